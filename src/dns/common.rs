use bitstream_io::{BitReader, BitWriter, Endianness};

use super::error::ParseError;

/// Shared wire (de)serialisation contract for fixed-layout packet pieces
/// (currently just the header, whose fields are sub-byte bit widths).
pub trait PacketComponent {
    fn write<E: Endianness>(
        &self,
        writer: &mut BitWriter<&mut Vec<u8>, E>,
    ) -> Result<(), ParseError>;
    fn read<E: Endianness>(&mut self, reader: &mut BitReader<&[u8], E>) -> Result<(), ParseError>;
}
