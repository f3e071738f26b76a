//! SSD1306 OLED panels driven as a 16x8 character grid.

use clock_radio::config::{CELL_PX, DISPLAY_COLS, DISPLAY_WIDTH_PX};
use clock_radio::devices::{clamp_cell, TextDisplay};
use clock_radio::Error;
use defmt::warn;
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so both panels can sit on the
/// shared bus.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_5X8)
        .text_color(BinaryColor::On)
        .build()
}

/// One panel at a fixed I²C address.
pub struct Oled<I2C> {
    display: Display<I2C>,
    address: u8,
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self { display, address }
    }

    /// Initialise the controller and blank the panel.
    pub fn init(&mut self) -> Result<(), Error> {
        self.display.init().map_err(|_| {
            warn!("OLED 0x{:02x} did not answer", self.address);
            Error::Display
        })?;
        self.clear()?;
        self.flush()
    }

    fn blank_row(&mut self, row: u8) -> Result<(), Error> {
        Rectangle::new(
            Point::new(0, (row as u32 * CELL_PX) as i32),
            Size::new(DISPLAY_WIDTH_PX, CELL_PX),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(&mut self.display)
        .map_err(|_| Error::Display)
    }
}

impl<I2C> TextDisplay for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) -> Result<(), Error> {
        self.display.clear_buffer();
        Ok(())
    }

    fn update_text(&mut self, text: &str, col: u8, row: u8) -> Result<(), Error> {
        let (col, row) = clamp_cell(col, row);
        self.blank_row(row)?;

        // Glyphs are placed on the cell grid, not at the font's advance.
        let style = text_style();
        let mut glyph = [0u8; 4];
        let room = (DISPLAY_COLS - col) as usize;
        for (i, c) in text.chars().take(room).enumerate() {
            let x = (col as u32 + i as u32) * CELL_PX;
            let y = row as u32 * CELL_PX;
            Text::with_baseline(
                c.encode_utf8(&mut glyph),
                Point::new(x as i32, y as i32),
                style,
                Baseline::Top,
            )
            .draw(&mut self.display)
            .map_err(|_| Error::Display)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.display.flush().map_err(|_| Error::Display)
    }
}
