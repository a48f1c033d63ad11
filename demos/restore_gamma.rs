//! Example: replay confirmed gamma settings after a reboot.
//!
//! Run with: `cargo run --example restore_gamma [store.json]`

use kgamma_core::{GammaDevice, GammaError, JsonStore, SysfsDevice};

fn main() -> Result<(), GammaError> {
    // Initialize logging (optional)
    env_logger::init();

    let store_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "gamma.json".to_owned());

    let device = SysfsDevice::default();
    if !device.is_supported() {
        eprintln!("kgamma sysfs interface not found; nothing to restore");
        return Ok(());
    }

    let store = JsonStore::open(&store_path)?;
    kgamma_core::restore(&device, &store);
    println!("Restored gamma settings from {store_path}");

    Ok(())
}
