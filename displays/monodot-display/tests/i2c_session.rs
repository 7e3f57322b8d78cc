//! End-to-end session over a mock embedded-hal I2C bus

use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};
use monodot_display::{DisplayConfig, DisplayController, DisplayError, I2cTransport};

/// One completed I2C transaction: address and the concatenated written bytes
type Transfer = (u8, Vec<u8>);

#[derive(Default)]
struct MockI2c {
    transfers: Vec<Transfer>,
    /// Fail the transaction with this index
    fail_at: Option<usize>,
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c<SevenBitAddress> for MockI2c {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail_at == Some(self.transfers.len()) {
            return Err(ErrorKind::NoAcknowledge(i2c::NoAcknowledgeSource::Address));
        }

        let mut bytes = Vec::new();
        for op in operations.iter() {
            match op {
                Operation::Write(data) => bytes.extend_from_slice(data),
                Operation::Read(_) => return Err(ErrorKind::Other),
            }
        }
        self.transfers.push((address, bytes));
        Ok(())
    }
}

fn display(bus: MockI2c) -> DisplayController<I2cTransport<MockI2c>> {
    let config = DisplayConfig::SSD1306_128X64;
    DisplayController::new(I2cTransport::new(bus, config.address), config).unwrap()
}

#[test]
fn test_initialize_sends_one_framed_command_per_transfer() {
    let mut oled = display(MockI2c::default());
    oled.initialize().unwrap();

    let bus = oled.release().release();
    let expected = DisplayConfig::SSD1306_128X64.init_sequence();

    assert_eq!(bus.transfers.len(), expected.len());
    for ((address, bytes), command) in bus.transfers.iter().zip(expected) {
        assert_eq!(*address, 0x3C);
        assert_eq!(bytes.as_slice(), &[0x80, command]);
    }

    // Display on is last
    assert_eq!(bus.transfers.last().map(|t| t.1[1]), Some(0xAF));
}

#[test]
fn test_flush_sends_whole_buffer_in_one_transfer() {
    let mut oled = display(MockI2c::default());
    oled.draw_pixel(0, 0).unwrap();
    oled.draw_pixel(127, 63).unwrap();
    oled.flush().unwrap();

    let bus = oled.release().release();
    assert_eq!(bus.transfers.len(), 1);

    let (address, bytes) = &bus.transfers[0];
    assert_eq!(*address, 0x3C);
    assert_eq!(bytes.len(), 1 + 1024);
    assert_eq!(bytes[0], 0x40);
    assert_eq!(bytes[1], 0x01);
    assert_eq!(bytes[1024], 0x80);
    assert_eq!(bytes[2..1024].iter().filter(|&&b| b != 0).count(), 0);
}

#[test]
fn test_text_then_flush() {
    let mut oled = display(MockI2c::default());
    oled.set_position(0, 2);
    oled.draw_string("Hi").unwrap();
    oled.flush().unwrap();

    let bus = oled.release().release();
    let data = &bus.transfers[0].1[1..];

    // Two 5 column glyphs plus gaps leave the cursor at column 12
    let page2 = &data[2 * 128..3 * 128];
    let page3 = &data[3 * 128..4 * 128];
    assert!(page2[..11].iter().chain(&page3[..11]).any(|&b| b != 0));
    assert!(page2[11..].iter().chain(&page3[11..]).all(|&b| b == 0));
    assert_eq!(page2[5], 0x00);
    assert_eq!(page3[5], 0x00);
}

#[test]
fn test_display_modes_are_framed_as_commands() {
    let mut oled = display(MockI2c::default());
    oled.set_inverted(true).unwrap();
    oled.set_inverted(false).unwrap();
    oled.set_contrast(0x10).unwrap();
    oled.set_display_on(false).unwrap();

    let bus = oled.release().release();
    let sent: Vec<_> = bus.transfers.iter().map(|(_, b)| b.as_slice()).collect();
    assert_eq!(
        sent,
        vec![
            &[0x80, 0xA7][..],
            &[0x80, 0xA6],
            &[0x80, 0x81],
            &[0x80, 0x10],
            &[0x80, 0xAE],
        ]
    );
}

#[test]
fn test_bus_failure_surfaces_as_transport_error() {
    let mut oled = display(MockI2c {
        fail_at: Some(3),
        ..MockI2c::default()
    });

    let err = oled.initialize().unwrap_err();
    assert!(matches!(
        err,
        DisplayError::Transport(ErrorKind::NoAcknowledge(_))
    ));

    // Stopped at the failing command
    let bus = oled.release().release();
    assert_eq!(bus.transfers.len(), 3);
}

#[test]
fn test_drawing_never_touches_the_bus() {
    let mut oled = display(MockI2c::default());
    oled.draw_line(0, 0, 127, 63).unwrap();
    oled.draw_string("abc").unwrap();
    oled.clear();

    let bus = oled.release().release();
    assert!(bus.transfers.is_empty());
}
