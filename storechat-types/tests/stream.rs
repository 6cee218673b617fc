use storechat_types::*;

#[test]
fn chat_event_delta_accessor() {
    let event = ChatEvent::Delta("hello".into());
    assert_eq!(event.as_delta(), Some("hello"));
    assert!(!event.is_terminal());
}

#[test]
fn chat_event_terminals() {
    assert!(ChatEvent::Done.is_terminal());
    assert!(ChatEvent::Error("boom".into()).is_terminal());
    assert_eq!(ChatEvent::Done.as_delta(), None);
}

#[test]
fn vec_sink_records_callbacks_in_order() {
    let mut events: Vec<ChatEvent> = Vec::new();
    events.on_delta("Hel");
    events.on_delta("lo");
    events.on_done();
    assert_eq!(
        events,
        vec![
            ChatEvent::Delta("Hel".into()),
            ChatEvent::Delta("lo".into()),
            ChatEvent::Done,
        ]
    );
}

#[test]
fn callbacks_sink_forwards_each_method() {
    let mut deltas = Vec::new();
    let mut done = 0;
    let mut errors = Vec::new();
    {
        let mut sink = callbacks(
            |d: &str| deltas.push(d.to_string()),
            || done += 1,
            |e: &str| errors.push(e.to_string()),
        );
        sink.on_delta("a");
        sink.on_delta("b");
        sink.on_error("rate limited");
    }
    assert_eq!(deltas, vec!["a", "b"]);
    assert_eq!(done, 0);
    assert_eq!(errors, vec!["rate limited"]);
}

#[test]
fn mutable_reference_is_a_sink() {
    fn drive<S: DeltaSink>(mut sink: S) {
        sink.on_delta("x");
        sink.on_done();
    }

    let mut events: Vec<ChatEvent> = Vec::new();
    drive(&mut events);
    assert_eq!(events.len(), 2);
}

#[test]
fn dyn_sink_is_usable_through_reference() {
    let mut events: Vec<ChatEvent> = Vec::new();
    let sink: &mut dyn DeltaSink = &mut events;
    sink.on_error("No response body");
    assert_eq!(events, vec![ChatEvent::Error("No response body".into())]);
}
