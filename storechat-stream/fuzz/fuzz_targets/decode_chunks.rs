#![no_main]
use libfuzzer_sys::fuzz_target;
use storechat_stream::FrameDecoder;

fuzz_target!(|data: &[u8]| {
    // First byte picks the chunk size so split points vary across runs.
    let Some((&size, body)) = data.split_first() else {
        return;
    };
    let size = usize::from(size).max(1);

    let mut decoder = FrameDecoder::new();
    let mut deltas = Vec::new();
    for chunk in body.chunks(size) {
        deltas.extend(decoder.push(chunk));
    }
    deltas.extend(decoder.finish());
    assert!(deltas.iter().all(|d| !d.is_empty()));
});
