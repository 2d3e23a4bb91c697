//! SSD1306 OLED display wrapper.

use core::fmt::Write as _;

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X15_BOLD};
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use scrollknob::scroll::{ModeView, ViewState};
use scrollknob::Error;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

fn title_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_9X15_BOLD)
        .text_color(BinaryColor::On)
        .build()
}

/// Render the scroll status screen.
///
/// Layout (128×64):
///   - row 1: mode title
///   - row 2: hint for the current mode
///   - rule
///   - row 3: host link state
///   - row 4: speed and direction
pub fn draw_status<I2C>(display: &mut Display<I2C>, view: &ViewState) -> Result<(), Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    let _ = Text::new(view.mode.title(), Point::new(0, 12), title_style()).draw(display);
    let _ = Text::new(view.mode.hint(), Point::new(0, 26), text_style()).draw(display);

    let _ = Line::new(Point::new(0, 32), Point::new(127, 32))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display);

    // Scroll lock already says "Connecting..." when the link is down.
    if view.mode != ModeView::Connecting {
        let _ = Text::new(view.link_label(), Point::new(0, 44), text_style()).draw(display);
    }

    let mut line: heapless::String<24> = heapless::String::new();
    let _ = write!(line, "Speed: {}", view.speed().label());
    if view.settings.invert {
        let _ = line.push_str("  INV");
    }
    let _ = Text::new(line.as_str(), Point::new(0, 58), text_style()).draw(display);

    display.flush().map_err(|_| Error::Display)
}
