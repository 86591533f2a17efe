use cadence_core::act;
use cadence_runner::{
    global_queue_group, global_runner, global_scheduler, install_global, teardown_global,
    RunnerConfig, RunnerError,
};
use cadence_test_fixtures::Flag;

// Each test runs on its own thread, so each sees a fresh thread-local slot.

#[test]
fn lookups_fail_before_install() {
    assert!(matches!(global_runner(), Err(RunnerError::NotInstalled)));
    assert!(matches!(global_scheduler(), Err(RunnerError::NotInstalled)));
    assert!(matches!(global_queue_group(), Err(RunnerError::NotInstalled)));
    assert!(teardown_global().is_none());
}

#[test]
fn install_then_use_then_teardown() {
    let runner = install_global(RunnerConfig::default()).unwrap();
    let called = Flag::new();
    global_scheduler().unwrap().add([act(called.setter())]);
    runner.update(0.0).unwrap();
    assert!(called.get());

    let group = global_queue_group().unwrap();
    assert!(group.is_empty());

    assert!(teardown_global().is_some());
    assert!(matches!(global_runner(), Err(RunnerError::NotInstalled)));
}

#[test]
fn second_install_is_rejected() {
    install_global(RunnerConfig::default()).unwrap();
    assert!(matches!(
        install_global(RunnerConfig::default()),
        Err(RunnerError::AlreadyInstalled)
    ));
    teardown_global();
    assert!(install_global(RunnerConfig::default()).is_ok());
    teardown_global();
}

#[test]
fn invalid_config_is_not_installed() {
    let config = RunnerConfig {
        tick_interval_ms: 0,
        ..Default::default()
    };
    assert!(matches!(install_global(config), Err(RunnerError::Config { .. })));
    assert!(global_runner().is_err());
}
