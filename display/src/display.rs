use sdl2::pixels::PixelFormatEnum;

use vip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vip8_core::Frame;

/// # Display
/// Presents the machine's 64x32 monochrome frame buffer in an SDL2 window.
/// Each machine pixel becomes a square of `scale` window pixels. `render`
/// only needs to be called when the frame buffer actually changed.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
}

impl Display {
    /// Opens the window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context to draw with
    /// * `scale` the window-pixel edge length of one machine pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video = sdl.video()?;
        let window = video
            .window(
                "vip8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        Ok(Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    /// Formats a frame for rendering as an SDL2 texture.
    ///
    /// An RGB24 texture is a 1D array of bytes holding concatenated rows of
    /// RGB pixels. This builds a black and white rendering by:
    /// - flattening the frame into a 1D array by concatenating its rows
    /// - triplicating each cell for the RGB channels of its pixel
    /// - stretching the 0/1 cell state to 0/255 intensity
    fn frame_to_texture(frame: &Frame) -> Vec<u8> {
        frame
            .grid()
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|cell| std::iter::repeat(cell).take(3))
            .map(|cell| cell * 255)
            .collect()
    }

    /// Renders a frame, scaled to fill the window.
    pub fn render(&mut self, frame: &Frame) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                self.width as u32,
                self.height as u32,
            )
            .map_err(|e| e.to_string())?;

        texture.with_lock(None, |buffer: &mut [u8], _pitch: usize| {
            buffer.copy_from_slice(&Display::frame_to_texture(frame));
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
