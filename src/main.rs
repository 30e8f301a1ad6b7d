use eyre::WrapErr;
use structopt::StructOpt as _;

use runtime::{
    Cancel,
    Report,
    SerialConfig,
    Session,
    SessionConfig,
};
use util::build;

pub use crate::options::Options;

mod options;
mod trace;

fn main() -> eyre::Result<()> {
    util::bootstrap!(
        "starting {} {} ({}, built at {} with rustc {})",
        build::PACKAGE,
        build::VERSION,
        build::COMMIT_HASH,
        build::BUILD_TIMESTAMP,
        build::RUSTC_SEMVER,
    );

    let options = match Options::from_args_safe() {
        Ok(options) => options,
        Err(e) => e.exit(),
    };

    let serial = options.serial_config()?;
    let session = options.session_config()?;

    trace::init();

    tracing::info!(
        application = build::PACKAGE,
        version = build::VERSION,
        build_commit = build::COMMIT_HASH,
        built_at = build::BUILD_TIMESTAMP,
        using_rustc = build::RUSTC_COMMIT_HASH,
        "tracing subsystem initialized"
    );

    let cancel = Cancel::register().wrap_err("registering signal handlers")?;

    let report = run(&serial, session, cancel)?;

    tracing::info!(
        probe = report.probe.as_ref().map(|msg| msg.name()).unwrap_or("<cancelled>"),
        setpoints_sent = report.setpoints_sent,
        setpoint_failures = report.setpoint_failures,
        frames = report.stats.frames,
        checksum_failures = report.stats.checksum_failures,
        unseeded = report.stats.unseeded,
        bytes_discarded = report.stats.bytes_discarded,
        skipped = report.stats.skipped,
        "session closed"
    );

    Ok(())
}

/// Drive one session to completion. Failures surface once, through the returned report.
fn run(serial: &SerialConfig, session: SessionConfig, cancel: Cancel) -> eyre::Result<Report> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("building tokio runtime")?;

    rt.block_on(Session::new(session, cancel).connect(serial))
        .wrap_err("offboard session failed")
}

#[cfg(test)]
mod test {
    use runtime::{
        serial,
        session,
    };
    use structopt::StructOpt;

    use super::*;

    #[test]
    fn missing_device_fails_once() {
        let serial = SerialConfig {
            path: "/nonexistent/offboard-tty".to_owned(),
            ..Default::default()
        };

        let options = Options::from_iter_safe(["offboard"]).unwrap();
        let err = run(&serial, options.session_config().unwrap(), Cancel::new()).unwrap_err();

        let failed = err
            .chain()
            .filter(|cause| cause.to_string() == "offboard session failed")
            .count();
        assert_eq!(failed, 1);

        assert!(matches!(
            err.downcast_ref::<session::Error>(),
            Some(session::Error::Serial(serial::Error::CannotOpen { .. }))
        ));
    }
}
