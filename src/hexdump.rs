/// Hexdump a program based on Linux `hexdump`
///
/// Bytes are grouped into big-endian 16-bit words, `stride` bytes per line, and the last line
/// holds the total length. An odd trailing byte is padded with zero.
pub fn hexdump(program: &[u8], addr_width: usize, stride: usize) -> String {
    fn addr(str: &mut String, offset: usize, addr_width: usize) {
        if offset != 0 {
            str.push('\n');
        }
        str.push_str(format!("{:0width$x}", offset, width = addr_width).as_str());
    }

    let mut str = String::new();

    for (ix, bytes) in program.chunks(2).enumerate() {
        let offset = ix * 2;
        if offset % stride == 0 {
            addr(&mut str, offset, addr_width);
        }

        let word = u16::from_be_bytes([bytes[0], bytes.get(1).copied().unwrap_or(0)]);
        str.push_str(format!(" {:04x}", word).as_str());
    }
    addr(&mut str, program.len(), addr_width);

    str
}

/// Render a program as a Logisim ROM image.
///
/// Logisim reads `v2.0 raw` images as whitespace separated hex words.
pub fn logisim_image(program: &[u8]) -> String {
    let mut str = String::from("v2.0 raw\n");
    for bytes in program.chunks(2) {
        let word = u16::from_be_bytes([bytes[0], bytes.get(1).copied().unwrap_or(0)]);
        str.push_str(format!("{:04x} ", word).as_str());
    }
    str.push('\n');

    str
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn program() -> Vec<u8> {
        vec![
            0x41, 0x00, 0x42, 0x00, 0x41, 0x21, 0x02, 0x44, 0x4b, 0x2a, 0xef, 0xfd, 0xc0, 0x00,
            0x00, 0x14, 0x84, 0x00, 0x00, 0x63, 0x05, 0x40,
        ]
    }

    #[test]
    fn test_hexdump() {
        let str = hexdump(&program(), 7, 16);

        assert_eq!(
            str,
            "0000000 4100 4200 4121 0244 4b2a effd c000 0014
0000010 8400 0063 0540
0000016"
        );
    }

    #[test]
    fn test_hexdump_edges() {
        let tests = vec![
            (vec![], "0000"),
            (vec![0x01], "0000 0100\n0001"),
            (vec![0x01, 0x02, 0x03, 0x04], "0000 0102\n0002 0304\n0004"),
        ];
        for (program, expected) in tests {
            assert_eq!(hexdump(&program, 4, 2), expected);
        }
    }

    #[test]
    fn test_logisim_image() {
        assert_eq!(
            logisim_image(&program()),
            "v2.0 raw\n4100 4200 4121 0244 4b2a effd c000 0014 8400 0063 0540 \n"
        );
        assert_eq!(logisim_image(&[]), "v2.0 raw\n\n");
    }
}
