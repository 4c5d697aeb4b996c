use hydraulic_cylinder::config::{CylinderConfig, OperatingResetPolicy, Variant};
use hydraulic_cylinder::control::CylinderController;
use hydraulic_cylinder::error::CylinderError;
use hydraulic_cylinder::simulation::OperationMode;
use hydraulic_cylinder::thresholds::PressureBand;
use hydraulic_cylinder::timers::VirtualClock;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn quiet_controller(variant: Variant) -> (CylinderController<VirtualClock, StepRng>, VirtualClock) {
    let clock = VirtualClock::new();
    let controller = CylinderController::new(
        CylinderConfig::for_variant(variant),
        clock.clone(),
        StepRng::new(0, 0),
    )
    .unwrap();
    (controller, clock)
}

#[test]
fn extend_from_default_for_five_ticks() {
    let (mut ctl, _clock) = quiet_controller(Variant::Full);
    assert_eq!(ctl.cylinder().extension(), 45.0);
    assert_eq!(ctl.cylinder().mode(), OperationMode::Manual);

    ctl.set_mode(OperationMode::Extend);
    ctl.run_for(500);

    let readout = ctl.readout();
    assert_eq!(readout.extension, 55.0);
    assert!(readout.flow_rate > 0.0);
    assert_eq!(readout.pressure, 1000.0 + 55.0 * 15.0);
    assert_eq!(readout.pressure_band, PressureBand::High);
}

#[test]
fn extend_then_manual_freezes_rod() {
    let (mut ctl, clock) = quiet_controller(Variant::Full);
    ctl.set_mode(OperationMode::Extend);
    ctl.set_mode(OperationMode::Manual);
    ctl.run_for(10_000);
    assert_eq!(ctl.cylinder().extension(), 45.0);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn compact_variant_hides_status_and_starts_higher() {
    let (mut ctl, _clock) = quiet_controller(Variant::Compact);
    assert!(!ctl.config().show_status_panel);
    assert_eq!(ctl.cylinder().extension(), 70.0);

    ctl.set_mode(OperationMode::Extend);
    ctl.run_for(2_000);
    assert_eq!(ctl.cylinder().extension(), 100.0);
    assert_eq!(ctl.readout().pressure_band, PressureBand::Critical);
}

#[test]
fn operator_session_ends_in_emergency_stop() {
    let clock = VirtualClock::new();
    let mut ctl = CylinderController::new(
        CylinderConfig {
            reset_policy: OperatingResetPolicy::Independent,
            ..CylinderConfig::default()
        },
        clock.clone(),
        ChaCha8Rng::seed_from_u64(2024),
    )
    .unwrap();

    ctl.set_mode(OperationMode::Auto);
    ctl.run_for(20_000);
    let readout = ctl.readout();
    assert!((0.0..=100.0).contains(&readout.extension));
    assert!(readout.temperature >= 68.0 && readout.temperature < 68.0 + 30.0 + 5.0);

    assert_eq!(
        ctl.set_extension(10.0),
        Err(CylinderError::NotManual {
            mode: OperationMode::Auto
        })
    );

    ctl.set_mode(OperationMode::Manual);
    ctl.set_extension(12.5).unwrap();
    ctl.set_extension(12.6).unwrap();
    assert_eq!(ctl.cylinder().extension(), 12.6);
    assert_eq!(ctl.cylinder().flow_rate(), 0.0);
    assert!(ctl.cylinder().is_operating());

    ctl.emergency_stop();
    assert_eq!(ctl.cylinder().mode(), OperationMode::Manual);
    assert_eq!(ctl.cylinder().extension(), 0.0);

    ctl.run_for(500);
    assert!(!ctl.cylinder().is_operating());
    assert_eq!(clock.pending(), 0);
}
