use offboard_runtime::{
    session::Error,
    Cancel,
    Session,
};

use common::*;
use message::payload::HighresImu;

mod common;

fn greeting() -> Vec<u8> {
    from_autopilot([HighresImu::default().into()])
}

#[tokio::test(start_paused = true)]
async fn failed_setpoint_is_not_fatal() -> eyre::Result<()> {
    trace_init();

    let cancel = Cancel::new();
    // Write 0 is the enable command; write 2 is the second setpoint.
    let (channel, journal) = Scripted::new(greeting(), vec![2], cancel.clone(), 4);

    let report = Session::new(config(), cancel).run(channel).await?;

    assert_eq!(report.setpoints_sent, 3);
    assert_eq!(report.setpoint_failures, 1);

    let journal = journal.lock().unwrap();
    assert!(journal.shutdown);

    let sent = journal_messages(&journal);
    assert_eq!(sent.len(), 5);
    assert!(is_enable(&sent[0]));
    assert!(sent[1..4].iter().all(|m| position(m).is_some()));
    assert!(is_disable(&sent[4]));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn failed_enable_is_fatal() {
    let cancel = Cancel::new();
    let (channel, journal) = Scripted::new(greeting(), vec![0], cancel.clone(), 1);

    let result = Session::new(config(), cancel).run(channel).await;

    assert!(matches!(result, Err(Error::Handshake { action: "enable", .. })));
    assert!(journal.lock().unwrap().writes.is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_disable_is_fatal() {
    let cancel = Cancel::new();
    // enable, two setpoints, then the disable command fails.
    let (channel, journal) = Scripted::new(greeting(), vec![3], cancel.clone(), 2);

    let result = Session::new(config(), cancel).run(channel).await;

    assert!(matches!(result, Err(Error::Handshake { action: "disable", .. })));

    let sent = journal_messages(&journal.lock().unwrap());
    assert_eq!(sent.len(), 3);
    assert!(is_enable(&sent[0]));
}
