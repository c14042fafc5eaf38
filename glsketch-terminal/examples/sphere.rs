/// Example: Render the lit sphere at a chosen tessellation
///
/// Usage: cargo run --example sphere -- [precision]
use anyhow::Context;
use glsketch_core::shapes::DEFAULT_SPHERE_PRECISION;
use glsketch_terminal::{demos::DirectionalLightDemo, Demo, Gallery, TerminalApp};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let precision = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u16>()
            .with_context(|| format!("invalid sphere precision {:?}", arg))?,
        None => DEFAULT_SPHERE_PRECISION,
    };
    let demo: Box<dyn Demo> = Box::new(DirectionalLightDemo::with_precision(1.0, precision)?);
    let mut app = TerminalApp::new(Gallery::new(vec![demo])?)?;
    app.run()?;

    Ok(())
}
