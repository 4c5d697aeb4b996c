use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hydraulic_cylinder::config::CylinderConfig;
use hydraulic_cylinder::control::CylinderController;
use hydraulic_cylinder::error::CylinderResult;
use hydraulic_cylinder::readout::CylinderReadout;
use hydraulic_cylinder::simulation::OperationMode;
use hydraulic_cylinder::timers::VirtualClock;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// One scripted operator action and how long to let the cylinder run after it.
enum Step {
    Mode(OperationMode, u64),
    Slide(f64, u64),
    Stop(u64),
}

const SCRIPT: &[Step] = &[
    Step::Mode(OperationMode::Extend, 1_500),
    Step::Mode(OperationMode::Auto, 6_000),
    Step::Mode(OperationMode::Retract, 1_000),
    Step::Mode(OperationMode::Manual, 200),
    Step::Slide(30.0, 200),
    Step::Slide(32.5, 600),
    Step::Mode(OperationMode::Extend, 800),
    Step::Stop(500),
];

/// Readouts are printed every this many virtual milliseconds.
const FRAME_MS: u64 = 100;

fn print_readout(t_ms: u64, r: &CylinderReadout) {
    println!(
        "t: {:>5.1}s | {:<7} | ext: {:>5.1}% | P: {:>4.0} PSI ({:<8}) | Q: {:.1} GPM | T: {:.1} °F | load: {:.0} lbs{}",
        t_ms as f64 / 1000.0,
        r.mode.label(),
        r.extension,
        r.pressure,
        r.pressure_band.label(),
        r.flow_rate,
        r.temperature,
        r.load,
        if r.is_operating { " | OPERATING" } else { "" },
    );
}

fn main() -> CylinderResult<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let clock = VirtualClock::new();
    let mut controller = CylinderController::new(
        CylinderConfig::default(),
        clock.clone(),
        ChaCha8Rng::seed_from_u64(seed),
    )?;

    print_readout(clock.now_ms(), &controller.readout());
    for step in SCRIPT {
        let hold_ms = match *step {
            Step::Mode(mode, hold_ms) => {
                println!("-> mode {}", mode);
                controller.set_mode(mode);
                hold_ms
            }
            Step::Slide(value, hold_ms) => {
                println!("-> slide to {:.1}%", value);
                controller.set_extension(value)?;
                hold_ms
            }
            Step::Stop(hold_ms) => {
                println!("-> EMERGENCY STOP");
                controller.emergency_stop();
                hold_ms
            }
        };

        let mut elapsed = 0;
        while elapsed < hold_ms {
            let frame = FRAME_MS.min(hold_ms - elapsed);
            controller.run_for(frame);
            elapsed += frame;
            print_readout(clock.now_ms(), &controller.readout());
            thread::sleep(Duration::from_millis(frame));
        }
    }

    controller.shutdown();
    Ok(())
}
