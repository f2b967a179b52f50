//! Device identifier derived from the flash chip's unique id.

use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use heapless::String;

/// Size of the on-board flash (Raspberry Pi Pico).
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// 64-bit unique id as 16 lowercase hex digits.
pub type DeviceIdString = String<16>;

/// Read the flash unique id and hex-encode it.
///
/// Returns `None` if the flash does not answer the unique-id command.
pub fn read_device_id(flash: Peri<'static, FLASH>) -> Option<DeviceIdString> {
    let mut flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(flash);
    let mut uid = [0u8; 8];
    flash.blocking_unique_id(&mut uid).ok()?;
    Some(hex_encode(&uid))
}

fn hex_encode(bytes: &[u8; 8]) -> DeviceIdString {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut out = DeviceIdString::new();
    for &b in bytes {
        // Capacity is exactly two digits per byte
        let _ = out.push(char::from(HEX[usize::from(b >> 4)]));
        let _ = out.push(char::from(HEX[usize::from(b & 0x0F)]));
    }
    out
}
