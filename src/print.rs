use std::fmt::{self, Write};

use crate::entry::{Entry, Kind};
use crate::integer::{integer_str, INTEGER_BUF_LEN};

impl Entry {
    /// Writes an indented, human readable dump of the tree. Not an encoding.
    ///
    /// Every line the printer starts is indented by one space per level, beginning at
    /// `indent`. Strings containing any byte outside printable ASCII are dumped as two hex
    /// digits per byte. Integer and string values of a dictionary are printed on the same
    /// line as their `[key]`; other values start on the next line two levels deeper.
    pub fn print<W: Write>(&self, out: &mut W, indent: usize) -> fmt::Result {
        write_indent(out, indent)?;
        self.print_value(out, indent)
    }

    // Assumes the line is already started.
    fn print_value<W: Write>(&self, out: &mut W, indent: usize) -> fmt::Result {
        match self {
            Entry::Integer(value) => {
                let mut buf = [0u8; INTEGER_BUF_LEN];
                writeln!(out, "{}", integer_str(&mut buf, *value))
            }
            Entry::String(s) if s.is_printable() => writeln!(out, "{}", s),
            Entry::String(s) => {
                for byte in s.as_bytes() {
                    write!(out, "{:02x}", byte)?;
                }
                writeln!(out)
            }
            Entry::List(list) => {
                writeln!(out, "list")?;
                for item in list {
                    item.print(out, indent + 1)?;
                }
                Ok(())
            }
            Entry::Dictionary(dict) => {
                writeln!(out, "dictionary")?;
                for item in dict {
                    write_indent(out, indent + 1)?;
                    write!(out, "[{}]", item.key())?;
                    match item.value().kind() {
                        Kind::Integer | Kind::String => {
                            out.write_char(' ')?;
                            item.value().print_value(out, indent + 2)?;
                        }
                        _ => {
                            writeln!(out)?;
                            item.value().print(out, indent + 2)?;
                        }
                    }
                }
                Ok(())
            }
            Entry::Undefined => writeln!(out, "<uninitialized>"),
        }
    }
}

fn write_indent<W: Write>(out: &mut W, indent: usize) -> fmt::Result {
    for _ in 0..indent {
        out.write_char(' ')?;
    }
    Ok(())
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.print(f, 0)
    }
}
