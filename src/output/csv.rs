//! Comma-separated report writer.
//!
//! Format:
//! ```text
//! #dstport,packets,bytes
//! 80,30,3000
//! ```

use crate::aggregator::RankedRow;
use crate::utils::error::OutputError;
use std::io::Write;

/// Write the header line followed by one line per row
///
/// The header is written even when `rows` is empty.
pub fn write_csv<W: Write>(
    mut writer: W,
    key_name: &str,
    rows: &[RankedRow],
) -> Result<(), OutputError> {
    writeln!(writer, "#{},packets,bytes", key_name)?;
    for row in rows {
        writeln!(writer, "{},{},{}", row.key, row.packets, row.bytes)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(key_name: &str, rows: &[RankedRow]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, key_name, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_only_when_empty() {
        assert_eq!(render("srcport", &[]), "#srcport,packets,bytes\n");
    }

    #[test]
    fn test_rows_in_given_order() {
        let rows = vec![
            RankedRow::new("2001:db8::", 9, 900),
            RankedRow::new("10.0.0.0", 3, 4000),
        ];
        assert_eq!(
            render("srcip", &rows),
            "#srcip,packets,bytes\n2001:db8::,9,900\n10.0.0.0,3,4000\n"
        );
    }
}
