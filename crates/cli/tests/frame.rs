//! Tests for the stdout framing protocol.

use chain::Callback;
use persona::{
    Framer,
    frame::{EOT, ETX, GS, RS, STX, US},
};

#[test]
fn marker_values() {
    assert_eq!(
        [STX, US, ETX, GS, RS, EOT],
        [0x02, 0x1F, 0x03, 0x1D, 0x1E, 0x04]
    );
}

#[test]
fn frames_tokens_and_memory() {
    let mut framer = Framer::new(Vec::new());
    framer.on_start().unwrap();
    framer.on_token("Hel").unwrap();
    framer.on_token("lo").unwrap();
    framer.on_end().unwrap();
    framer.finish("summary", "[]").unwrap();

    assert_eq!(
        framer.into_inner(),
        b"\x02Hel\x1Flo\x1F\x03\x1Dsummary\x1E[]\x04".to_vec()
    );
}

#[test]
fn empty_response_still_frames() {
    let mut framer = Framer::new(Vec::new());
    framer.on_start().unwrap();
    framer.on_end().unwrap();
    framer.finish("", "[]").unwrap();

    assert_eq!(framer.into_inner(), b"\x02\x03\x1D\x1E[]\x04".to_vec());
}

#[test]
fn multibyte_tokens_are_written_as_utf8() {
    let mut framer = Framer::new(Vec::new());
    framer.on_token("café").unwrap();
    assert_eq!(framer.get_ref(), &"café\x1F".as_bytes().to_vec());
}
