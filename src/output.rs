use std::io::{self, Write};

use crate::bench::Report;

// Writes the final report to `out`, in one of the four shapes of
// `spec.md` §6.2. Only called at rank 0.
pub fn write_report<W: Write>(out: &mut W, report: &Report, binary: bool) -> io::Result<()> {
    match (report, binary) {
        (Report::Total { mean, stdev }, false) => {
            writeln!(out, "Mean Sorting Time, Standard Deviation")?;
            writeln!(out, "{mean}, {stdev}")
        }
        (Report::Phases(p), false) => {
            writeln!(out, "Phase 1, Phase 2, Phase 3, Phase 4")?;
            writeln!(out, "{}, {}, {}, {}", p[0], p[1], p[2], p[3])
        }
        (Report::Total { mean, stdev }, true) => {
            out.write_all(&mean.to_le_bytes())?;
            out.write_all(&stdev.to_le_bytes())
        }
        (Report::Phases(p), true) => {
            for value in p {
                out.write_all(&value.to_le_bytes())?;
            }
            Ok(())
        }
    }
}
