//! Rewrite a CDR file record by record: decode each line, overwrite the SIP
//! status tag where present, and write the re-encoded record out.
//!
//! ```text
//! cargo run --release --example rewrite_records -- input.cdr output.cdr
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::process::ExitCode;

use smsg_codec::{Decoder, Encoder};

const SIP_STATUS_TAG: u16 = 0x1503;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let (input, output) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            eprintln!("usage: rewrite_records <input.cdr> <output.cdr>");
            return ExitCode::from(2);
        }
    };

    match run(&input, &output) {
        Ok(count) => {
            eprintln!("rewrote {count} records");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("rewrite_records: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: &str, output: &str) -> Result<u64, Box<dyn std::error::Error>> {
    let mut reader = BufReader::with_capacity(32 * 1024, File::open(input)?);
    let mut writer = BufWriter::with_capacity(32 * 1024, File::create(output)?);

    let decoder = Decoder::new();
    let mut encoder = Encoder::new();
    let mut line = Vec::new();
    let mut count = 0u64;

    // read_until keeps raw bytes; lines() would demand UTF-8 up front
    while reader.read_until(b'\n', &mut line)? > 0 {
        let mut record = decoder
            .decode(&line)
            .map_err(|err| format!("record {}: {err}", count + 1))?;
        if record.tag(SIP_STATUS_TAG).is_some() {
            record.set_tag(SIP_STATUS_TAG, "999");
        }
        writer.write_all(encoder.encode(&record)?)?;
        count += 1;
        line.clear();
    }

    writer.flush()?;
    Ok(count)
}
