use crate::domain::error::BridgeResult;

/// Confirmation codes reported by the sensor in acknowledge packets.
pub mod status {
    pub const OK: u8 = 0x00;
    pub const PACKET_RECEIVE_ERR: u8 = 0x01;
    pub const NO_FINGER: u8 = 0x02;
    pub const IMAGE_FAIL: u8 = 0x03;
    pub const IMAGE_MESS: u8 = 0x06;
    pub const FEATURE_FAIL: u8 = 0x07;
    pub const NO_MATCH: u8 = 0x08;
    pub const NOT_FOUND: u8 = 0x09;
    pub const ENROLL_MISMATCH: u8 = 0x0A;
    pub const BAD_LOCATION: u8 = 0x0B;
    pub const DB_READ_FAIL: u8 = 0x0C;
    pub const UPLOAD_FEATURE_FAIL: u8 = 0x0D;
    pub const PACKET_RESPONSE_FAIL: u8 = 0x0E;
    pub const UPLOAD_FAIL: u8 = 0x0F;
    pub const DELETE_FAIL: u8 = 0x10;
    pub const DB_CLEAR_FAIL: u8 = 0x11;
    pub const PASS_FAIL: u8 = 0x13;
    pub const INVALID_IMAGE: u8 = 0x15;
    pub const FLASH_ERR: u8 = 0x18;
    pub const INVALID_REG: u8 = 0x1A;
    pub const ADDR_CODE: u8 = 0x20;
    pub const PASS_VERIFY: u8 = 0x21;

    /// Short label for a confirmation code, for log output only.
    pub fn describe(code: u8) -> &'static str {
        match code {
            OK => "ok",
            PACKET_RECEIVE_ERR => "error receiving packet",
            NO_FINGER => "no finger on sensor",
            IMAGE_FAIL => "failed to capture image",
            IMAGE_MESS => "image too messy",
            FEATURE_FAIL => "too few feature points",
            NO_MATCH => "fingers do not match",
            NOT_FOUND => "no matching template",
            ENROLL_MISMATCH => "failed to combine character files",
            BAD_LOCATION => "location beyond library",
            DB_READ_FAIL => "error reading template library",
            UPLOAD_FEATURE_FAIL => "error uploading template",
            PACKET_RESPONSE_FAIL => "cannot receive following packets",
            UPLOAD_FAIL => "error uploading image",
            DELETE_FAIL => "failed to delete template",
            DB_CLEAR_FAIL => "failed to clear library",
            PASS_FAIL => "wrong password",
            INVALID_IMAGE => "no valid primary image",
            FLASH_ERR => "error writing flash",
            INVALID_REG => "invalid register",
            ADDR_CODE => "wrong address",
            PASS_VERIFY => "password must be verified",
            _ => "unknown confirmation code",
        }
    }
}

/// Aura LED parameters for `set_led`.
///
/// Values stay as parsed from the command line; the driver decides whether
/// they fit the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedSettings {
    pub color: i64,
    pub mode: i64,
    pub speed: i64,
    pub cycles: i64,
}

impl LedSettings {
    pub const DEFAULT_COLOR: i64 = 1;
    pub const DEFAULT_MODE: i64 = 3;
    pub const DEFAULT_SPEED: i64 = 0x80;
    pub const DEFAULT_CYCLES: i64 = 0;
}

impl Default for LedSettings {
    fn default() -> Self {
        Self {
            color: Self::DEFAULT_COLOR,
            mode: Self::DEFAULT_MODE,
            speed: Self::DEFAULT_SPEED,
            cycles: Self::DEFAULT_CYCLES,
        }
    }
}

/// Fingerprint sensor capability driven by the dispatcher.
///
/// Each operation returns the confirmation code of the sensor's reply.
/// A non-OK code is a normal result; `Err` is reserved for failures that
/// prevent a reply from being obtained at all.
pub trait FingerprintSensor {
    /// Enumerate occupied template slots.
    fn read_templates(&mut self) -> BridgeResult<u8>;

    /// Capture a fingerprint image into the image buffer.
    fn get_image(&mut self) -> BridgeResult<u8>;

    /// Convert the image buffer into character buffer `slot`.
    fn image_2_tz(&mut self, slot: i64) -> BridgeResult<u8>;

    /// Search the library for character buffer 1.
    ///
    /// On `status::OK` the matched ID is available from `finger_id`.
    fn finger_search(&mut self) -> BridgeResult<u8>;

    fn delete_model(&mut self, location: i64) -> BridgeResult<u8>;

    /// Combine both character buffers into a model.
    fn create_model(&mut self) -> BridgeResult<u8>;

    fn store_model(&mut self, location: i64) -> BridgeResult<u8>;

    fn set_led(&mut self, led: LedSettings) -> BridgeResult<u8>;

    /// ID matched by the last successful `finger_search`.
    fn finger_id(&self) -> u16;
}
