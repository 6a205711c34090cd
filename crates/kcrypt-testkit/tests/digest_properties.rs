//! Digest session properties over software-backed channels.

use kcrypt::socket::SessionState;
use kcrypt_testkit::fixtures::software_session;
use kcrypt_testkit::vectors::{all_vectors, run_vector};
use proptest::prelude::*;

#[test]
fn known_answers() {
    for vector in all_vectors() {
        let mut session = software_session(vector.algorithm).unwrap();
        let digest = run_vector(&mut session, &vector).unwrap();
        assert_eq!(&digest[..], &vector.expected_bytes()[..], "{}", vector.algorithm);
        assert_eq!(session.bytes_hashed(), vector.input().len() as u64);
        assert_eq!(session.state(), SessionState::Finalized);
    }
}

#[test]
fn empty_sha256() {
    let mut session = software_session("sha256").unwrap();
    let digest = session.finalize().unwrap();
    assert_eq!(
        hex::encode(&digest),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn only_the_last_send_is_final() {
    let mut session = software_session("sha512").unwrap();
    for chunk in [&b"one"[..], b"", b"three"] {
        session.update(chunk).unwrap();
    }
    session.finalize().unwrap();

    let sent = session.channel().sent();
    assert_eq!(sent.len(), 4);
    assert!(sent[..3].iter().all(|c| !c.is_final));
    assert!(sent[3].is_final && sent[3].data.is_empty());
}

#[test]
#[should_panic(expected = "update on a finalized")]
fn update_after_finalize() {
    let mut session = software_session("sha256").unwrap();
    session.finalize().unwrap();
    let _ = session.update(b"more");
}

proptest! {
    #[test]
    fn chunking_never_changes_digest(
        data in prop::collection::vec(any::<u8>(), 0..2048),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let mut points: Vec<usize> = cuts.iter().map(|i| i.index(data.len() + 1)).collect();
        points.sort_unstable();

        let mut chunked = software_session("sha256").unwrap();
        let mut start = 0;
        for point in points {
            chunked.update(&data[start..point]).unwrap();
            start = point;
        }
        chunked.update(&data[start..]).unwrap();

        let mut whole = software_session("sha256").unwrap();
        whole.update(&data).unwrap();

        prop_assert_eq!(chunked.finalize().unwrap(), whole.finalize().unwrap());
    }
}
