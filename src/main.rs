use std::process;

use log::{error, info};

use hamilton::config::Config;
use hamilton::random::Randf64;
use hamilton::{Quaternion, QuatResult};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let cfg = match Config::new(std::env::args().skip(1).collect()) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    };
    info!("{cfg}");

    if let Err(err) = run(&cfg) {
        error!("{err}");
        process::exit(1);
    }
}

fn run(cfg: &Config) -> QuatResult<()> {
    let (q1, q2) = (cfg.q1, cfg.q2);

    info!("Sum: {}", q1 + q2);
    info!("Difference: {}", q1 - q2);
    info!("Product: {}", q1 * q2);

    info!("Norm of Quaternion 1: {}", q1.norm());
    info!("Conjugate of Quaternion 1: {}", q1.conjugate());
    info!("Inverse of Quaternion 1: {}", q1.inverse()?);

    info!("Quaternion 1 is equal to Quaternion 2: {}", q1 == q2);
    info!("Quaternion 1 is not equal to Quaternion 2: {}", q1 != q2);

    let rotation = q1.to_rotation_matrix();
    info!("Rotation Matrix from Quaternion 1:\n{rotation}");
    info!("Quaternion from Rotation Matrix: {}", Quaternion::from_rotation_matrix(&rotation));

    let unit = Randf64::seed(cfg.seed).unit_quat();
    let back = Quaternion::from_rotation_matrix(&unit.to_rotation_matrix());
    info!("Random rotation {unit} round trips to {back}");

    Ok(())
}
