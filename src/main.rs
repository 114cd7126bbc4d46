use anyhow::Result;

use memprobe::app::App;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::init();

    let app = App::new()?;
    let report = app.collect();

    if !report.memory.is_known() {
        log::warn!("Could not determine physical memory on {}", report.platform);
    }

    println!("{}", app.render(&report)?);
    Ok(())
}
