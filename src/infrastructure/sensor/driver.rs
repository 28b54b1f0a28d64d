use crate::core::sensor::{status, FingerprintSensor, LedSettings};
use crate::domain::config::SensorSettings;
use crate::domain::error::{BridgeError, BridgeResult};
use crate::infrastructure::sensor::packet::{self, instruction, PacketKind};
use std::io::{ErrorKind, Read, Write};
use tracing::{debug, info, trace};

/// Templates covered by one index-table page.
const TEMPLATES_PER_PAGE: u16 = 256;
const INDEX_TABLE_BYTES: usize = 32;

/// System parameters reported by `ReadSysPara`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemParameters {
    pub status_register: u16,
    pub system_id: u16,
    pub library_size: u16,
    pub security_level: u16,
    pub device_address: u32,
    pub data_packet_size: u16,
    /// Baud rate as a multiple of 9600
    pub baud_multiplier: u16,
}

impl SystemParameters {
    fn parse(data: &[u8]) -> BridgeResult<Self> {
        if data.len() < 16 {
            return Err(BridgeError::Protocol(format!(
                "system parameters need 16 bytes, got {}",
                data.len()
            )));
        }
        let word = |at: usize| u16::from_be_bytes([data[at], data[at + 1]]);

        Ok(Self {
            status_register: word(0),
            system_id: word(2),
            library_size: word(4),
            security_level: word(6),
            device_address: u32::from_be_bytes([data[8], data[9], data[10], data[11]]),
            data_packet_size: word(12),
            baud_multiplier: word(14),
        })
    }

    pub fn baud_rate(&self) -> u32 {
        u32::from(self.baud_multiplier) * 9600
    }
}

/// Driver for R30x/R50x-family optical and capacitive sensors.
///
/// Speaks the sensor's packet protocol over any byte transport. Every
/// operation is one command frame followed by one acknowledge frame of a
/// known size.
pub struct SensorDriver<T: Read + Write> {
    transport: T,
    address: u32,
    password: u32,
    finger_id: u16,
    confidence: u16,
    templates: Vec<u16>,
    parameters: Option<SystemParameters>,
}

impl<T: Read + Write> SensorDriver<T> {
    /// Wrap `transport` and perform the handshake.
    ///
    /// Fails if the sensor rejects the password or cannot report its system
    /// parameters.
    pub fn open(transport: T, settings: &SensorSettings) -> BridgeResult<Self> {
        let mut driver = Self {
            transport,
            address: settings.address,
            password: settings.password,
            finger_id: 0,
            confidence: 0,
            templates: Vec::new(),
            parameters: None,
        };

        let code = driver.verify_password()?;
        if code != status::OK {
            return Err(BridgeError::Sensor {
                operation: "verify_password",
                code,
            });
        }

        let parameters = driver.read_system_parameters()?;
        info!(
            "Sensor ready: library size {}, security level {}, {} baud",
            parameters.library_size,
            parameters.security_level,
            parameters.baud_rate()
        );
        Ok(driver)
    }

    pub fn verify_password(&mut self) -> BridgeResult<u8> {
        let mut payload = vec![instruction::VERIFY_PASSWORD];
        payload.extend_from_slice(&self.password.to_be_bytes());
        let reply = self.transact(&payload, 1)?;
        Ok(reply[0])
    }

    /// Read and cache the system parameters. A non-OK code is an error.
    pub fn read_system_parameters(&mut self) -> BridgeResult<SystemParameters> {
        let reply = self.transact(&[instruction::READ_SYS_PARA], 17)?;
        if reply[0] != status::OK {
            return Err(BridgeError::Sensor {
                operation: "read_system_parameters",
                code: reply[0],
            });
        }

        let parameters = SystemParameters::parse(&reply[1..])?;
        self.parameters = Some(parameters);
        Ok(parameters)
    }

    /// Parameters from the most recent successful read.
    pub fn system_parameters(&self) -> Option<&SystemParameters> {
        self.parameters.as_ref()
    }

    /// Occupied template locations found by the last `read_templates`.
    pub fn templates(&self) -> &[u16] {
        &self.templates
    }

    /// Match score of the last `finger_search`.
    pub fn confidence(&self) -> u16 {
        self.confidence
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    fn simple(&mut self, payload: &[u8]) -> BridgeResult<u8> {
        let reply = self.transact(payload, 1)?;
        Ok(reply[0])
    }

    /// Send one command frame and read an acknowledge frame carrying
    /// `payload_len` payload bytes.
    fn transact(&mut self, payload: &[u8], payload_len: usize) -> BridgeResult<Vec<u8>> {
        let frame = packet::encode(self.address, PacketKind::Command, payload)?;
        trace!("tx {}", hex::encode(&frame));
        self.transport.write_all(&frame)?;
        self.transport.flush()?;

        let expected = packet::ack_frame_len(payload_len);
        let mut buffer = vec![0u8; expected];
        let mut received = 0;
        while received < expected {
            match self.transport.read(&mut buffer[received..]) {
                Ok(0) => return Err(BridgeError::Timeout { expected, received }),
                Ok(n) => received += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    return Err(BridgeError::Timeout { expected, received })
                }
                Err(e) => return Err(e.into()),
            }
        }
        trace!("rx {}", hex::encode(&buffer));

        let reply = packet::decode_ack(&buffer, self.address)?;
        if reply.len() < payload_len {
            return Err(BridgeError::Protocol(format!(
                "reply to {:#04x} carries {} bytes, expected {}",
                payload[0],
                reply.len(),
                payload_len
            )));
        }
        debug!(
            "Instruction {:#04x} -> {:#04x} ({})",
            payload[0],
            reply[0],
            status::describe(reply[0])
        );
        Ok(reply)
    }
}

fn to_u8(name: &'static str, value: i64) -> BridgeResult<u8> {
    u8::try_from(value).map_err(|_| BridgeError::OutOfRange { name, value })
}

fn to_u16(name: &'static str, value: i64) -> BridgeResult<u16> {
    u16::try_from(value).map_err(|_| BridgeError::OutOfRange { name, value })
}

impl<T: Read + Write> FingerprintSensor for SensorDriver<T> {
    fn read_templates(&mut self) -> BridgeResult<u8> {
        let library_size = self.read_system_parameters()?.library_size;
        let pages = library_size.div_ceil(TEMPLATES_PER_PAGE);

        self.templates.clear();
        let mut result = status::DB_READ_FAIL;
        for page in 0..pages {
            // page < 256 because library_size is a u16
            let reply = self.transact(&[instruction::TEMPLATE_READ, page as u8], 1 + INDEX_TABLE_BYTES)?;
            if reply[0] != status::OK {
                debug!("Index page {} unreadable: {:#04x}", page, reply[0]);
                continue;
            }

            for (offset, byte) in reply[1..=INDEX_TABLE_BYTES].iter().enumerate() {
                for bit in 0..8u16 {
                    if byte & (1u8 << bit) != 0 {
                        self.templates.push(page * TEMPLATES_PER_PAGE + offset as u16 * 8 + bit);
                    }
                }
            }
            result = status::OK;
        }

        debug!("{} template(s) stored", self.templates.len());
        Ok(result)
    }

    fn get_image(&mut self) -> BridgeResult<u8> {
        self.simple(&[instruction::GET_IMAGE])
    }

    fn image_2_tz(&mut self, slot: i64) -> BridgeResult<u8> {
        let slot = to_u8("slot", slot)?;
        self.simple(&[instruction::IMAGE_2_TZ, slot])
    }

    fn finger_search(&mut self) -> BridgeResult<u8> {
        let [cap_hi, cap_lo] = self.read_system_parameters()?.library_size.to_be_bytes();
        let reply = self.transact(
            &[instruction::HI_SPEED_SEARCH, 0x01, 0x00, 0x00, cap_hi, cap_lo],
            5,
        )?;

        self.finger_id = u16::from_be_bytes([reply[1], reply[2]]);
        self.confidence = u16::from_be_bytes([reply[3], reply[4]]);
        Ok(reply[0])
    }

    fn delete_model(&mut self, location: i64) -> BridgeResult<u8> {
        let [hi, lo] = to_u16("location", location)?.to_be_bytes();
        self.simple(&[instruction::DELETE, hi, lo, 0x00, 0x01])
    }

    fn create_model(&mut self) -> BridgeResult<u8> {
        self.simple(&[instruction::REG_MODEL])
    }

    fn store_model(&mut self, location: i64) -> BridgeResult<u8> {
        let [hi, lo] = to_u16("location", location)?.to_be_bytes();
        self.simple(&[instruction::STORE, 0x01, hi, lo])
    }

    fn set_led(&mut self, led: LedSettings) -> BridgeResult<u8> {
        let payload = [
            instruction::SET_AURA,
            to_u8("mode", led.mode)?,
            to_u8("speed", led.speed)?,
            to_u8("color", led.color)?,
            to_u8("cycles", led.cycles)?,
        ];
        self.simple(&payload)
    }

    fn finger_id(&self) -> u16 {
        self.finger_id
    }
}
