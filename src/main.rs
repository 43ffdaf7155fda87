use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use gl_window_host::cli::Cli;
use gl_window_host::demo::DemoClient;
use gl_window_host::{client_handle, WindowHost};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.resolve()?;

    let mut host = WindowHost::new();
    host.set_core_profile_enabled(config.core_profile)?;
    host.set_background_color(config.background_color());
    host.show(&config.title, config.size())
        .context("Failed to open window")?;

    let client = Rc::new(RefCell::new(DemoClient::new(host.gl(), host.window_size())));
    host.set_client(Some(client_handle(&client)));

    println!(
        "{} - drag to paint, Space shifts the marker color, close the window to quit",
        config.title
    );
    host.do_main_loop()?;

    Ok(())
}
