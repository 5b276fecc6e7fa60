use log::trace;

use crate::constants::KEY_COUNT;
use crate::error::Result;
use crate::frame::Frame;
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::state::State;

/// # Machine
/// The Chip-8 virtual machine: the interpreter state plus the host-facing
/// input latch.
///
/// Supplies interfaces for:
/// - loading a program image
/// - stepping the interpreter one fetch-decode-execute-timer cycle at a time
/// - latching key state between steps
/// - inspecting the frame buffer for rendering by some display
///
/// The host governs cadence. A step is an atomic unit of work: the machine
/// performs no timing or sleeping of its own, and a step that fails leaves
/// the state exactly as it was before the step.
pub struct Machine {
    state: State,
    keys: [bool; KEY_COUNT],
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            state: State::new(),
            keys: [false; KEY_COUNT],
        }
    }

    /// Bulk-write a program image into the program region.
    ///
    /// # Arguments
    /// * `program` the raw bytes of a ROM image
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.state.memory.load_program(program)
    }

    /// Advance the machine by a single cycle: fetch the word at the program
    /// counter, decode it, execute it, and tick both timers once.
    ///
    /// Returns whether the fetched word decoded to a known instruction.
    /// Unmapped words execute as a no-op, as on the interpreter this machine
    /// models, so they advance the program counter but change nothing else.
    pub fn step(&mut self) -> Result<bool> {
        let op = self.fetch()?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op.0,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        let decoded = Instruction::decode(op);
        self.state = match decoded {
            Some(instruction) => instruction.execute(&self.state, self.keys)?,
            None => State {
                pc: self.state.pc + 0x2,
                ..self.state
            },
        };
        self.tick_timers();
        Ok(decoded.is_some())
    }

    /// Latch the pressed state of a keypad key. Indices outside 0..=0xF are
    /// ignored; the latch is level-sensitive and the interpreter never
    /// writes it.
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        if let Some(slot) = self.keys.get_mut(key as usize) {
            *slot = pressed;
        }
    }

    /// Current pressed state of a keypad key.
    pub fn key(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// Read-only view of the display surface.
    pub fn frame(&self) -> &Frame {
        &self.state.frame
    }

    /// Returns the frame buffer if the display should be redrawn, clearing
    /// the redraw flag.
    pub fn take_frame(&mut self) -> Option<Frame> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame)
        } else {
            None
        }
    }

    /// Whether the sound timer is running; the host may beep while it is.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory holds bytes but opcodes are 16 bits, so two adjacent bytes are
    /// combined big-endian.
    fn fetch(&self) -> Result<Opcode> {
        let pc = self.state.pc as usize;
        let high = self.state.memory.read(pc)?;
        let low = self.state.memory.read(pc + 1)?;
        Ok(Opcode(u16::from(high) << 8 | u16::from(low)))
    }

    /// Both timers count down once per executed instruction, flooring at
    /// zero.
    fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test_machine {
    use super::*;
    use crate::constants::{GLYPH_BASE, GLYPH_SPRITES, PROGRAM_START};
    use crate::error::Error;

    #[test]
    fn test_fetch_combines_bytes() {
        let mut machine = Machine::new();
        machine.load_program(&[0xAA, 0xBB]).unwrap();
        assert_eq!(machine.fetch(), Ok(Opcode(0xAABB)));
    }

    #[test]
    fn test_new_machine_layout() {
        let machine = Machine::new();
        assert_eq!(machine.state.pc, PROGRAM_START);
        assert_eq!(machine.state.sp, 0);
        assert_eq!(machine.state.v, [0; 16]);
        assert_eq!(machine.state.i, 0);
        let base = GLYPH_BASE as usize;
        for (offset, byte) in GLYPH_SPRITES.iter().enumerate() {
            assert_eq!(machine.state.memory.read(base + offset), Ok(*byte));
        }
    }

    #[test]
    fn test_step_executes_and_advances() {
        let mut machine = Machine::new();
        machine.load_program(&[0x00, 0xE0]).unwrap();
        let recognized = machine.step().unwrap();
        assert!(recognized);
        assert_eq!(machine.state.pc, PROGRAM_START + 0x2);
    }

    #[test]
    fn test_step_absorbs_unmapped_words() {
        let mut machine = Machine::new();
        machine.load_program(&[0x01, 0x23]).unwrap();
        let recognized = machine.step().unwrap();
        assert!(!recognized);
        assert_eq!(machine.state.pc, PROGRAM_START + 0x2);
    }

    #[test]
    fn test_step_out_of_bounds_fetch() {
        let mut machine = Machine::new();
        machine.state.pc = 0xFFF;
        assert_eq!(
            machine.step(),
            Err(Error::OutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn test_step_ticks_timers() {
        let mut machine = Machine::new();
        machine.load_program(&[0x00, 0xE0, 0x00, 0xE0]).unwrap();
        machine.state.delay_timer = 2;
        machine.state.sound_timer = 1;
        machine.step().unwrap();
        assert_eq!(machine.state.delay_timer, 1);
        assert_eq!(machine.state.sound_timer, 0);
        machine.step().unwrap();
        // both floor at zero
        assert_eq!(machine.state.delay_timer, 0);
        assert_eq!(machine.state.sound_timer, 0);
    }

    #[test]
    fn test_sound_active_tracks_timer() {
        let mut machine = Machine::new();
        assert!(!machine.sound_active());
        machine.state.sound_timer = 3;
        assert!(machine.sound_active());
    }

    #[test]
    fn test_key_latch_roundtrip() {
        let mut machine = Machine::new();
        machine.set_key(0xE, true);
        assert!(machine.key(0xE));
        machine.set_key(0xE, false);
        assert!(!machine.key(0xE));
        // out-of-range indices are ignored rather than latched
        machine.set_key(0x10, true);
        assert!(!machine.key(0x10));
    }

    #[test]
    fn test_take_frame_clears_redraw_flag() {
        let mut machine = Machine::new();
        assert!(machine.take_frame().is_none());
        machine.load_program(&[0x00, 0xE0]).unwrap();
        machine.step().unwrap();
        assert!(machine.take_frame().is_some());
        assert!(machine.take_frame().is_none());
    }

    #[test]
    fn test_add_with_carry_program() {
        // V0 = 10; V1 = 5; V0 += V1 with carry flag
        let mut machine = Machine::new();
        machine
            .load_program(&[0x60, 0x0A, 0x61, 0x05, 0x80, 0x14])
            .unwrap();
        for _ in 0..3 {
            machine.step().unwrap();
        }
        assert_eq!(machine.state.v[0x0], 15);
        assert_eq!(machine.state.v[0xF], 0);
        assert_eq!(machine.state.pc, PROGRAM_START + 0x6);
    }

    #[test]
    fn test_return_on_empty_stack_fails_the_step() {
        let mut machine = Machine::new();
        machine.load_program(&[0x00, 0xEE]).unwrap();
        assert_eq!(machine.step(), Err(Error::StackUnderflow));
        // the failed step left the machine untouched
        assert_eq!(machine.state.pc, PROGRAM_START);
    }

    #[test]
    fn test_wait_for_key_stalls_until_keypress() {
        // FX0A waiting into V5
        let mut machine = Machine::new();
        machine.load_program(&[0xF5, 0x0A]).unwrap();
        for _ in 0..5 {
            machine.step().unwrap();
            assert_eq!(machine.state.pc, PROGRAM_START);
            assert_eq!(machine.state.v[0x5], 0);
        }
        machine.set_key(0x3, true);
        machine.step().unwrap();
        assert_eq!(machine.state.v[0x5], 0x3);
        assert_eq!(machine.state.pc, PROGRAM_START + 0x2);
    }

    #[test]
    fn test_glyph_lookup_renders_builtin_bitmaps() {
        // for each glyph: point I at it via FX29, then compare the sprite
        // bytes it addresses against the built-in table
        for glyph in 0..16u8 {
            let mut machine = Machine::new();
            machine.load_program(&[0x60, glyph, 0xF0, 0x29]).unwrap();
            machine.step().unwrap();
            machine.step().unwrap();
            let base = machine.state.i as usize;
            assert_eq!(base, GLYPH_BASE as usize + glyph as usize * 5);
            for row in 0..5 {
                assert_eq!(
                    machine.state.memory.read(base + row),
                    Ok(GLYPH_SPRITES[glyph as usize * 5 + row])
                );
            }
        }
    }

    #[test]
    fn test_draw_twice_restores_blank_frame() {
        // point I at the 0 glyph, draw it twice at the same spot
        let rom = [0xF0, 0x29, 0xD0, 0x05, 0xD0, 0x05];
        let mut machine = Machine::new();
        machine.load_program(&rom).unwrap();
        machine.step().unwrap();
        machine.step().unwrap();
        assert_eq!(machine.state.v[0xF], 0);
        machine.step().unwrap();
        // the second draw erased every pixel and reported the collision
        assert_eq!(machine.state.v[0xF], 1);
        assert_eq!(*machine.frame(), Frame::new());
    }
}
