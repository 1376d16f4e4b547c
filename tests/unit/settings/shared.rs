use super::*;

#[test]
fn override_forces_then_restores_each_initial_value() {
    for initial in [true, false] {
        let setting = ProcessSetting::shared(initial);
        let guard = SettingOverride::acquire(setting.clone(), false);
        assert!(!setting.get());
        assert_eq!(guard.saved(), initial);
        assert_eq!(guard.restore(), initial);
        assert_eq!(setting.get(), initial);
    }
}

#[test]
fn drop_restores_when_restore_is_never_called() {
    let setting = ProcessSetting::shared(true);
    {
        let _guard = SettingOverride::acquire(setting.clone(), false);
        assert!(!setting.get());
    }
    assert!(setting.get());
}

#[test]
fn restore_does_not_clobber_later_host_changes_twice() {
    let setting = ProcessSetting::shared(true);
    let guard = SettingOverride::acquire(setting.clone(), false);
    guard.restore();
    // The host flips the switch after recording; the consumed guard must not touch it again.
    setting.set(false);
    assert!(!setting.get());
}

#[test]
fn restore_survives_a_panicking_scope() {
    let setting = ProcessSetting::shared(true);
    let s = setting.clone();
    let result = std::panic::catch_unwind(move || {
        let _guard = SettingOverride::acquire(s, false);
        panic!("recording blew up");
    });
    assert!(result.is_err());
    assert!(setting.get());
}
