//! Example: set the red channel's first amplitude and confirm it.
//!
//! Run with: `cargo run --example tune_channel <value 0-31>`

use kgamma_core::{Amp, Channel, EditSession, GammaError, JsonStore, MAX_AMP, SysfsDevice};

fn main() -> Result<(), GammaError> {
    // Initialize logging (optional)
    env_logger::init();

    let value: u32 = std::env::args()
        .nth(1)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
        .min(MAX_AMP);

    let device = SysfsDevice::default();
    let mut store = JsonStore::open("gamma.json")?;

    let mut session = EditSession::open(&device, Channel::Red)?;
    let state = session.state();
    println!("red channel amps: {} {}", state.amp0, state.amp1);

    session.set_amp(Amp::Amp0, value)?;
    match session.commit(&mut store) {
        Ok(()) => println!("Confirmed amp0 = {value}"),
        Err(e) => eprintln!("Failed to confirm: {e}"),
    }

    Ok(())
}
