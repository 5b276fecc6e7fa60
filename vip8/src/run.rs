use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Error};
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vip8_core::Machine;
use vip8_display::Display;

use crate::keymap::keymap;

/// Drives one machine until its window closes: latches host key events,
/// paces interpreter cycles at `cycle_delay`, and redraws whenever a cycle
/// touched the frame buffer. An interpreter fault halts the machine.
pub fn run(scale: u32, cycle_delay: Duration, rom: &Path) -> anyhow::Result<()> {
    let mut machine = Machine::new();
    let program = fs::read(rom).with_context(|| format!("unable to read ROM {}", rom.display()))?;
    machine.load_program(&program)?;
    info!("loaded {} byte ROM from {}", program.len(), rom.display());

    let sdl = sdl2::init().map_err(Error::msg)?;
    let mut display = Display::new(&sdl, scale).map_err(Error::msg)?;
    let mut events = sdl.event_pump().map_err(Error::msg)?;

    let mut last_cycle = Instant::now();

    'event: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(index) = keymap(key) {
                        machine.set_key(index, true);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(index) = keymap(key) {
                        machine.set_key(index, false);
                    }
                }
                _ => continue,
            };
        }

        machine.step().context("interpreter fault")?;

        if let Some(frame) = machine.take_frame() {
            display.render(&frame).map_err(Error::msg)?;
        }

        // pace cycles to the requested cadence
        let elapsed = last_cycle.elapsed();
        if cycle_delay > elapsed {
            std::thread::sleep(cycle_delay - elapsed);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
