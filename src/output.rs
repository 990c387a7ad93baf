//! This module is in charge of outputting the final results to the standard
//! output and various files

use crate::{
    config::Configuration,
    cuts::{Cut, Quantity},
    numeric::{reals, Float},
    statistics::CutStatistics,
    task::TaskResults,
};
use eyre::Result;
use particle_id::ParticleID;
use std::{
    fs::File,
    io::{self, Write},
    time::Duration,
};
use strum::IntoEnumIterator;
use time::{format_description::well_known::Rfc2822, OffsetDateTime};

// Number of significant digits in file output
const SIG_DIGITS: usize = (reals::DIGITS - 1) as usize;

/// Output the final results to the console and to disk
pub fn dump_results(
    cfg: &Configuration,
    results: &TaskResults,
    elapsed_time: Duration,
) -> Result<()> {
    // Print out a summary on stdout
    print_summary(results);

    // Compute a timestamp of when the run ended
    let timestamp = OffsetDateTime::now_utc().format(&Rfc2822)?;

    // Write execution timings to a file
    {
        let mut tim_file = File::create("res.times")?;
        let tim_file = &mut tim_file;

        writeln_res(tim_file, &timestamp[..])?;
        let elapsed_secs = elapsed_time.as_secs_f64() as Float;
        writeln_res(tim_file, "---------------------------------------------")?;
        writeln_res(tim_file, ("Elapsed time (s)", elapsed_secs))?;
        let secs_per_ev = elapsed_secs / (results.num_events as Float);
        writeln_res(tim_file, ("Elapsed time per event (s)", secs_per_ev))?;
        let secs_per_cand = elapsed_secs / (results.num_candidates.max(1) as Float);
        writeln_res(tim_file, ("Elapsed time per candidate (s)", secs_per_cand))?;
    }

    // Write main results file
    {
        let cuts = &cfg.cuts;
        let mut dat_file = File::create("res.data")?;
        let dat_file = &mut dat_file;

        // Configuration echo
        writeln_res(dat_file, ("Cut set", &cfg.name[..]))?;
        writeln_res(dat_file, ("Number of events", results.num_events))?;
        writeln_res(dat_file, ("Primaries per event", cfg.primaries_per_event))?;
        writeln_res(dat_file, ("Random seed", cfg.seed as usize))?;
        writeln_res(dat_file, ("Require charged", cuts.require_charged()))?;
        writeln_res(dat_file, ("Require neutral", cuts.require_neutral()))?;
        writeln_res(dat_file, ("Require primary", cuts.require_primary()))?;
        writeln_res(dat_file, ("Require secondary", cuts.require_secondary()))?;
        match cuts.pdg_code_requirement() {
            Some(pdg) if pdg.absolute => writeln_res(dat_file, ("Require |PDG code|", pdg.code))?,
            Some(pdg) => writeln_res(dat_file, ("Require PDG code", pdg.code))?,
            None => writeln_res(dat_file, ("Require PDG code", "no"))?,
        }
        for quantity in Quantity::iter() {
            let label = quantity.to_string();
            writeln_res(dat_file, (&format!("{label} min")[..], cuts.min(quantity)))?;
            writeln_res(dat_file, (&format!("{label} max")[..], cuts.max(quantity)))?;
        }

        // Counts
        writeln_res(dat_file, "---------------------------------------------")?;
        writeln_res(dat_file, ("Candidates", results.num_candidates))?;
        writeln_res(dat_file, ("... after cuts", results.num_accepted))?;
        writeln_res(dat_file, ("Acceptance", results.acceptance))?;
        if let Some(mean) = results.mean_decay_length() {
            writeln_res(dat_file, ("Mean decay length (cm)", mean))?;
        }

        // Per-cut failures and QA efficiencies
        writeln_res(dat_file, "---------------------------------------------")?;
        let statistics = results.cuts.statistics();
        let qa = results.cuts.qa_histograms();
        for cut in Cut::iter() {
            write!(
                dat_file,
                " {:>3} {:<11}{:>12} ",
                cut.bin(),
                cut.to_string(),
                statistics.failures(cut.bin())
            )?;
            match qa.efficiency(cut) {
                Some(efficiency) => write_engineering(dat_file, efficiency, SIG_DIGITS)?,
                None => write!(dat_file, "-")?,
            }
            writeln!(dat_file)?;
        }

        // Accepted species
        writeln_res(dat_file, "---------------------------------------------")?;
        for (&pdg, &count) in &results.species {
            writeln!(dat_file, " {:>11}{:>12}", pdg, count)?;
        }
    }

    // Write the cut failure correlation matrix
    {
        let mut cor_file = File::create("res.correlation")?;
        write_correlation(&mut cor_file, results.cuts.statistics())?;
    }

    // ...and we're done
    Ok(())
}

/// Write the cut failure correlation matrix, with cut labels on both axes
fn write_correlation(writer: &mut impl Write, statistics: &CutStatistics) -> io::Result<()> {
    write!(writer, "{:<11}", "")?;
    for cut in Cut::iter() {
        write!(writer, "{:>11}", cut.to_string())?;
    }
    writeln!(writer)?;
    for cut_x in Cut::iter() {
        write!(writer, "{:<11}", cut_x.to_string())?;
        for cut_y in Cut::iter() {
            write!(writer, "{:>11}", statistics.correlation(cut_x.bin(), cut_y.bin()))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Display a summary of the results on stdout
fn print_summary(results: &TaskResults) {
    println!("Events          : {}", results.num_events);
    println!("Candidates      : {}", results.num_candidates);
    println!("Accepted        : {}", results.num_accepted);
    println!("Acceptance      : {}", results.acceptance);
    let statistics = results.cuts.statistics();
    for cut in Cut::iter().filter(|cut| statistics.failures(cut.bin()) > 0) {
        println!(
            "Failed {:<9}: {}",
            cut.to_string(),
            statistics.failures(cut.bin())
        );
    }
}

/// Text output facility with a leading space and key-value alignment
fn writeln_res(file: &mut File, data: impl WriteRes) -> io::Result<()> {
    write!(file, " ")?;
    data.write(file)?;
    writeln!(file)
}

/// Trait implemented by things which can be printed in result files
trait WriteRes: Sized {
    /// Write down `self` to the output file
    fn write(self, file: &mut File) -> io::Result<()>;
}

impl WriteRes for &str {
    fn write(self, file: &mut File) -> io::Result<()> {
        write!(file, "{}", self)
    }
}

impl WriteRes for usize {
    fn write(self, file: &mut File) -> io::Result<()> {
        write!(file, "{}", self)
    }
}

impl WriteRes for bool {
    // Written the Fortran way, so that the output can be pasted back into a
    // configuration file
    fn write(self, file: &mut File) -> io::Result<()> {
        write!(file, "{}", if self { ".true." } else { ".false." })
    }
}

impl WriteRes for ParticleID {
    fn write(self, file: &mut File) -> io::Result<()> {
        write!(file, "{}", self.id())
    }
}

impl WriteRes for Float {
    // %g was used for floats, this is a close approximation
    fn write(self, file: &mut File) -> io::Result<()> {
        write_engineering(file, self, SIG_DIGITS)
    }
}

impl<T: WriteRes> WriteRes for (&str, T) {
    // Key-value output that uses fixed-size columns for better readability
    fn write(self, file: &mut File) -> io::Result<()> {
        write!(*file, "{:<31}: ", self.0)?;
        self.1.write(file)
    }
}

/// Write a floating-point number using "engineering" notation
///
/// Analogous to the %g format of the C printf function, this method switches
/// between naive and scientific notation for floating-point numbers when the
/// number being printed becomes so small that printing leading zeroes could end
/// up larger than the scientific notation, or so large that we would be forced
/// to print more significant digits than requested.
///
fn write_engineering(writer: &mut impl Write, x: Float, sig_digits: usize) -> io::Result<()> {
    let mut precision = sig_digits - 1;
    if x == 0. {
        // Zero is special because you can't take its log
        write!(writer, "0")
    } else {
        // Otherwise, use log to evaluate order of magnitude
        let log_x = x.abs().log10();
        if (-3. ..=(sig_digits as Float)).contains(&log_x) {
            // Print using naive notation
            //
            // Since Rust's precision controls number of digits after the
            // decimal point, we must adjust it depending on magnitude in order
            // to operate at a constant number of significant digits.
            precision = (precision as isize - log_x.trunc() as isize) as usize;

            // Numbers smaller than 1 must get one extra digit since the leading
            // zero does not count as a significant digit.
            if log_x < 0. {
                precision += 1
            }

            // People don't normally expect trailing zeros or decimal point in
            // naive notation, but be careful with integer numbers...
            let str_with_zeros = format!("{:.1$}", x, precision);
            if str_with_zeros.contains('.') {
                write!(
                    writer,
                    "{}",
                    str_with_zeros.trim_end_matches('0').trim_end_matches('.')
                )
            } else {
                write!(writer, "{}", str_with_zeros)
            }
        } else {
            // Print using scientific notation
            write!(writer, "{:.1$e}", x, precision)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bitmap::DecisionBitmap, cuts::NUM_CUTS};

    fn engineering(x: Float) -> String {
        let mut buffer = Vec::new();
        write_engineering(&mut buffer, x, 6).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn labelled_correlation_matrix() {
        let mut bitmap = DecisionBitmap::all_passed();
        bitmap.set(Cut::Charge, false);
        bitmap.set(Cut::DecayLengthMax, false);
        let mut statistics = CutStatistics::new();
        statistics.record(&bitmap);

        let mut buffer = Vec::new();
        write_correlation(&mut buffer, &statistics).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), NUM_CUTS + 1);

        let header = lines[0].split_whitespace().collect::<Vec<_>>();
        let labels = Cut::iter().map(|cut| cut.to_string()).collect::<Vec<_>>();
        assert_eq!(header, labels);

        let charge_row = lines[1 + Cut::Charge.index()]
            .split_whitespace()
            .collect::<Vec<_>>();
        assert_eq!(charge_row.len(), NUM_CUTS + 1);
        assert_eq!(charge_row[0], "charge");
        assert_eq!(charge_row[1 + Cut::Charge.index()], "1");
        assert_eq!(charge_row[1 + Cut::DecayLengthMax.index()], "1");
        assert_eq!(charge_row[1 + Cut::PdgCode.index()], "0");
    }

    #[test]
    fn engineering_notation() {
        assert_eq!(engineering(0.), "0");
        assert_eq!(engineering(1.5), "1.5");
        assert_eq!(engineering(-1234.5), "-1234.5");
        assert_eq!(engineering(0.25), "0.25");
        assert_eq!(engineering(1e-5), "1.00000e-5");
        assert_eq!(engineering(1e9), "1.00000e9");
    }
}
