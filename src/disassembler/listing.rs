use crate::ast::Instruction;

#[derive(Debug)]
pub struct Listing<'a> {
    program: &'a [u8],
    code: Vec<Instruction>,
    current_address: usize,
    str: String,
}

impl<'a> Listing<'a> {
    /// `code` must be the decoded form of `program`, which is located at `start_address`.
    #[tracing::instrument(skip(program))]
    pub fn new(program: &'a [u8], code: Vec<Instruction>, start_address: usize) -> Self {
        Self {
            program,
            code,
            current_address: start_address,
            str: String::new(),
        }
    }

    /// Generate listing line from an instruction, its machine code and its memory address
    ///
    /// E.g. `0x0010  8400 0063  addi $4, $0, 0x63`
    #[tracing::instrument]
    pub fn generate_line(addr: usize, bytes: &[u8], ins: &Instruction) -> String {
        let words_str = bytes
            .chunks(2)
            .map(|word| word.iter().map(|b| format!("{:02x}", b)).collect::<String>())
            .collect::<Vec<String>>()
            .join(" ");

        format!("0x{:04x}  {:<9}  {}\n", addr, words_str, ins)
    }

    #[tracing::instrument(skip(self))]
    pub fn generate(&mut self) -> String {
        self.str.push_str(" Addr   Words      Instructions\n");
        self.str.push_str("---------------------------------\n");
        //                 0x0010  8400 0063  addi $4, $0, 0x63

        let mut offset = 0;
        for ins in &self.code {
            let end = (offset + ins.size()).min(self.program.len());
            let bytes = self.program.get(offset..end).unwrap_or_default();
            self.str
                .push_str(Listing::generate_line(self.current_address, bytes, ins).as_str());
            self.current_address += ins.size();
            offset += ins.size();
        }

        self.str.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::{disassemble_code, DisassemblerError};

    use pretty_assertions::assert_eq;

    #[test]
    fn test_listing() -> Result<(), DisassemblerError> {
        let program = [0x41, 0x00, 0x41, 0x21, 0xef, 0xff, 0x84, 0x00, 0x00, 0x63];
        let code = disassemble_code(&program)?;
        let expected = " Addr   Words      Instructions
---------------------------------
0x0000  4100       addi $1, $0, 0x0
0x0002  4121       addi $1, $1, 0x1
0x0004  efff       bnz 0x2
0x0006  8400 0063  addi $4, $0, 0x63
";

        assert_eq!(Listing::new(&program, code, 0).generate(), expected);
        Ok(())
    }

    #[test]
    fn test_words_are_taken_from_the_image() -> Result<(), DisassemblerError> {
        // Reserved low bits of an R word survive in the listing
        let program = [0x01, 0x03, 0xc1, 0x7f];
        let code = disassemble_code(&program)?;
        let listing = Listing::new(&program, code, 0).generate();
        let lines: Vec<&str> = listing.lines().skip(2).collect();

        assert_eq!(
            lines,
            vec![
                "0x0000  0103       add $1, $0, $0",
                "0x0002  c17f       jmp $3",
            ]
        );
        Ok(())
    }
}
