//! File I/O for saving and reloading a solved session.
//!
//! `solution.dat` holds one packed layout per line in decimal — the same
//! stable wire form external save systems store — and `solution.txt` is
//! the human-readable rendering. Loading re-validates every line through
//! the codec: a corrupted entry rejects the whole file rather than
//! guessing at its contents.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::board::{deserialize, format_board, Layout};

const SOLUTION_DAT: &str = "solution.dat";
const SOLUTION_TXT: &str = "solution.txt";

/// Saves a solution path to both the wire and text files under `dir`.
pub fn save<const R: usize, const C: usize>(dir: &Path, path: &[Layout]) -> std::io::Result<()> {
    save_text::<R, C>(dir, path)?;
    save_wire(dir, path)?;
    Ok(())
}

/// Human-readable rendering, one board per move.
fn save_text<const R: usize, const C: usize>(dir: &Path, path: &[Layout]) -> std::io::Result<()> {
    let mut file = File::create(dir.join(SOLUTION_TXT))?;
    writeln!(file, "Solved in {} moves:\n", path.len().saturating_sub(1))?;
    for (i, &layout) in path.iter().enumerate() {
        writeln!(file, "Move {i}:")?;
        write!(file, "{}", format_board::<R, C>(layout))?;
        writeln!(file)?;
    }
    Ok(())
}

/// One decimal packed layout per line.
fn save_wire(dir: &Path, path: &[Layout]) -> std::io::Result<()> {
    let mut file = File::create(dir.join(SOLUTION_DAT))?;
    for layout in path {
        writeln!(file, "{layout}")?;
    }
    Ok(())
}

/// Loads the saved solution path, validating every entry.
///
/// `None` when the file is missing or any line fails to parse or decode.
pub fn load_all<const R: usize, const C: usize>(dir: &Path) -> Option<Vec<Layout>> {
    let file = File::open(dir.join(SOLUTION_DAT)).ok()?;
    let mut path = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.ok()?;
        let layout = line.trim().parse::<Layout>().ok()?;
        deserialize::<R, C>(layout).ok()?;
        path.push(layout);
    }
    Some(path)
}

/// Number of saved path entries, without decoding them.
pub fn count(dir: &Path) -> Option<usize> {
    let contents = fs::read_to_string(dir.join(SOLUTION_DAT)).ok()?;
    Some(contents.lines().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::serialize;
    use crate::layouts::{to_rows, COLS, CORNER_BLOCK, ROWS};
    use crate::moves::successors;

    fn scratch_dir(test: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("huarong-{}-{test}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = scratch_dir("roundtrip");
        let initial = serialize::<ROWS, COLS>(&to_rows(&CORNER_BLOCK)).unwrap();
        let mut path = vec![initial];
        path.extend(successors::<ROWS, COLS>(initial).into_iter().take(2));

        save::<ROWS, COLS>(&dir, &path).unwrap();
        assert_eq!(load_all::<ROWS, COLS>(&dir), Some(path.clone()));
        assert_eq!(count(&dir), Some(path.len()));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_corrupted_line_rejects_the_file() {
        let dir = scratch_dir("corrupt");
        let initial = serialize::<ROWS, COLS>(&to_rows(&CORNER_BLOCK)).unwrap();
        save::<ROWS, COLS>(&dir, &[initial]).unwrap();

        let mut contents = fs::read_to_string(dir.join(SOLUTION_DAT)).unwrap();
        contents.push_str("18446744073709551615\n"); // all bits set: not a layout
        fs::write(dir.join(SOLUTION_DAT), contents).unwrap();

        assert_eq!(load_all::<ROWS, COLS>(&dir), None);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let dir = scratch_dir("missing");
        assert_eq!(load_all::<ROWS, COLS>(&dir), None);
        assert_eq!(count(&dir), None);
        fs::remove_dir_all(&dir).unwrap();
    }
}
