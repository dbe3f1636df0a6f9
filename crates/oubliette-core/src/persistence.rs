//! Save/load of the maze in a line-oriented text format, plus GraphViz
//! export.
//!
//! The format, top to bottom:
//!
//! ```text
//! <count>
//! <id>;<name>;<description>;<has_item>;<requires_item>;<is_exit>;<trap_solved>;<challenge>;<solution>;<hint>
//! <u> <v>
//! ```
//!
//! One ten-field room line per live room (`count` of them), then one line
//! per undirected passage with `u < v`. Plain three-field lines
//! (`id;name;description`) from older maps still load, with the gameplay
//! fields defaulting off. Stored ids are not trusted; the line index is
//! the id. Semicolon is the field delimiter, so free-text fields get
//! theirs replaced with commas on the way out.
//!
//! Loading always builds a fresh graph and hands it back whole. Callers
//! swap it in on success; a failed load leaves their current map alone.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::graph::MazeGraph;
use crate::room::{Room, Trap};

/// Save file used by the interactive shell when no path is given.
pub const DEFAULT_SAVE_FILE: &str = "prison_map.txt";

/// Errors from saving, loading, and exporting.
#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    /// No save file at the given path. A normal first-run report, not a
    /// corruption.
    Missing(PathBuf),
    /// The file does not parse as a maze; nothing was loaded.
    Corrupt { line: usize, reason: String },
}

impl From<io::Error> for SaveError {
    fn from(err: io::Error) -> Self {
        SaveError::Io(err)
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(err) => write!(f, "I/O error: {}", err),
            SaveError::Missing(path) => write!(f, "no saved map at {}", path.display()),
            SaveError::Corrupt { line, reason } => {
                write!(f, "corrupt save at line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for SaveError {}

fn corrupt(line: usize, reason: impl Into<String>) -> SaveError {
    SaveError::Corrupt {
        line,
        reason: reason.into(),
    }
}

/// Strip the field delimiter out of free text before writing.
fn sanitize(text: &str) -> String {
    text.replace(';', ",")
}

fn flag(value: bool) -> char {
    if value {
        '1'
    } else {
        '0'
    }
}

fn parse_flag(field: &str, line: usize) -> Result<bool, SaveError> {
    match field {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(corrupt(line, format!("expected a 0/1 flag, got {:?}", other))),
    }
}

/// Write the whole maze to `writer` in the line format.
pub fn save_graph<W: Write>(mut writer: W, graph: &MazeGraph) -> Result<(), SaveError> {
    writeln!(writer, "{}", graph.len())?;
    for room in graph.rooms() {
        let (solved, challenge, solution) = match &room.trap {
            Some(trap) => (
                trap.solved,
                sanitize(&trap.challenge),
                sanitize(&trap.solution),
            ),
            None => (false, String::new(), String::new()),
        };
        writeln!(
            writer,
            "{};{};{};{};{};{};{};{};{};{}",
            room.id,
            sanitize(&room.name),
            sanitize(&room.description),
            flag(room.has_item),
            flag(room.requires_item),
            flag(room.is_exit),
            flag(solved),
            challenge,
            solution,
            sanitize(room.hint.as_deref().unwrap_or("")),
        )?;
    }
    for u in 0..graph.len() {
        for v in (u + 1)..graph.len() {
            if graph.has_passage(u, v) {
                writeln!(writer, "{} {}", u, v)?;
            }
        }
    }
    Ok(())
}

fn next_line<R: Read>(
    lines: &mut io::Lines<BufReader<R>>,
    line_no: &mut usize,
) -> Result<Option<String>, SaveError> {
    match lines.next() {
        Some(Ok(line)) => {
            *line_no += 1;
            Ok(Some(line))
        }
        Some(Err(err)) => Err(SaveError::Io(err)),
        None => Ok(None),
    }
}

fn parse_room(line: &str, line_no: usize) -> Result<Room, SaveError> {
    // splitn(10): the trailing hint field may legitimately contain
    // anything, including stray semicolons from hand-edited files.
    let fields: Vec<&str> = line.splitn(10, ';').collect();
    match fields.len() {
        3 | 10 => {}
        n => {
            return Err(corrupt(
                line_no,
                format!("expected 3 or 10 fields, found {}", n),
            ))
        }
    }
    // The stored id is ignored (the line index wins), but garbage there
    // still means the file is damaged.
    if fields[0].trim().parse::<usize>().is_err() {
        return Err(corrupt(line_no, format!("bad room id {:?}", fields[0])));
    }

    let mut room = Room::new(fields[1], fields[2]);
    if fields.len() == 10 {
        room.has_item = parse_flag(fields[3], line_no)?;
        room.requires_item = parse_flag(fields[4], line_no)?;
        room.is_exit = parse_flag(fields[5], line_no)?;
        let solved = parse_flag(fields[6], line_no)?;
        if !fields[7].is_empty() || !fields[8].is_empty() {
            room.trap = Some(Trap {
                challenge: fields[7].to_string(),
                solution: fields[8].to_string(),
                solved,
            });
        }
        if !fields[9].is_empty() {
            room.hint = Some(fields[9].to_string());
        }
    }
    Ok(room)
}

/// Read a maze from `reader` into a fresh graph.
///
/// The new graph's capacity is the stored room count or `min_capacity`,
/// whichever is larger, so oversized saves always fit and small ones keep
/// editing headroom. Malformed lines abort with `Corrupt`; well-formed
/// passage lines whose endpoints fall outside the stored rooms are logged
/// and skipped.
pub fn load_graph<R: Read>(reader: R, min_capacity: usize) -> Result<MazeGraph, SaveError> {
    let mut lines = BufReader::new(reader).lines();
    let mut line_no = 0;

    let count_line =
        next_line(&mut lines, &mut line_no)?.ok_or_else(|| corrupt(1, "missing room count"))?;
    let count: usize = count_line.trim().parse().map_err(|_| {
        corrupt(line_no, format!("bad room count {:?}", count_line.trim()))
    })?;

    let mut graph = MazeGraph::new(count.max(min_capacity));
    for index in 0..count {
        let line = next_line(&mut lines, &mut line_no)?.ok_or_else(|| {
            corrupt(
                line_no + 1,
                format!("expected {} room lines, found {}", count, index),
            )
        })?;
        let room = parse_room(&line, line_no)?;
        graph
            .append(room)
            .map_err(|err| corrupt(line_no, err.to_string()))?;
    }

    while let Some(line) = next_line(&mut lines, &mut line_no)? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let (u, v) = match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => {
                let u = a.parse::<usize>().map_err(|_| {
                    corrupt(line_no, format!("bad passage endpoint {:?}", a))
                })?;
                let v = b.parse::<usize>().map_err(|_| {
                    corrupt(line_no, format!("bad passage endpoint {:?}", b))
                })?;
                (u, v)
            }
            _ => {
                return Err(corrupt(
                    line_no,
                    format!("expected a \"u v\" passage line, got {:?}", trimmed),
                ))
            }
        };
        if let Err(err) = graph.connect(u, v) {
            log::warn!("skipping stored passage {} {}: {}", u, v, err);
        }
    }
    Ok(graph)
}

/// Save to a file path, creating or overwriting it.
pub fn save_to_path(path: &Path, graph: &MazeGraph) -> Result<(), SaveError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    save_graph(&mut writer, graph)?;
    writer.flush()?;
    Ok(())
}

/// Load from a file path. A missing file reports `Missing` rather than an
/// I/O failure.
pub fn load_from_path(path: &Path, min_capacity: usize) -> Result<MazeGraph, SaveError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(SaveError::Missing(path.to_path_buf()));
        }
        Err(err) => return Err(SaveError::Io(err)),
    };
    load_graph(file, min_capacity)
}

/// Write the GraphViz rendering of the map, ready for `dot -Tpng`.
pub fn export_dot<W: Write>(mut writer: W, graph: &MazeGraph) -> Result<(), SaveError> {
    writeln!(writer, "graph escape_map {{")?;
    writeln!(writer, "  node [shape=box];")?;
    for room in graph.rooms() {
        writeln!(
            writer,
            "  {} [label=\"{}\"];",
            room.id,
            room.name.replace('"', "'")
        )?;
    }
    for u in 0..graph.len() {
        for v in (u + 1)..graph.len() {
            if graph.has_passage(u, v) {
                writeln!(writer, "  {} -- {};", u, v)?;
            }
        }
    }
    writeln!(writer, "}}")?;
    Ok(())
}

pub fn export_dot_to_path(path: &Path, graph: &MazeGraph) -> Result<(), SaveError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    export_dot(&mut writer, graph)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DEFAULT_CAPACITY;

    fn sample_graph() -> MazeGraph {
        let mut graph = MazeGraph::new(5);
        graph
            .append(Room::new("Cell 101", "Your cell.").with_hint("Move at midnight."))
            .unwrap();
        graph
            .append(
                Room::new("Guard Post", "Empty chairs.")
                    .with_item()
                    .with_trap("Watchword?", "october"),
            )
            .unwrap();
        graph
            .append(Room::new("Outer Gate", "The road beyond.").with_lock().with_exit())
            .unwrap();
        graph.connect(0, 1).unwrap();
        graph.connect(1, 2).unwrap();
        graph
    }

    #[test]
    fn test_save_writes_count_rooms_then_passages() {
        let mut buffer = Vec::new();
        save_graph(&mut buffer, &sample_graph()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "3");
        assert_eq!(lines[1], "0;Cell 101;Your cell.;0;0;0;0;;;Move at midnight.");
        assert_eq!(lines[2], "1;Guard Post;Empty chairs.;1;0;0;0;Watchword?;october;");
        assert_eq!(lines[3], "2;Outer Gate;The road beyond.;0;1;1;0;;;");
        assert_eq!(&lines[4..], &["0 1", "1 2"]);
    }

    #[test]
    fn test_roundtrip_preserves_rooms_and_passages() {
        let mut original = sample_graph();
        original.room_mut(1).unwrap().trap.as_mut().unwrap().solved = true;

        let mut buffer = Vec::new();
        save_graph(&mut buffer, &original).unwrap();
        let loaded = load_graph(&buffer[..], DEFAULT_CAPACITY).unwrap();

        assert_eq!(loaded.len(), original.len());
        assert_eq!(loaded.capacity(), DEFAULT_CAPACITY);
        assert_eq!(loaded.rooms(), original.rooms());
        for u in 0..original.len() {
            for v in 0..original.len() {
                assert_eq!(loaded.has_passage(u, v), original.has_passage(u, v));
            }
        }
    }

    #[test]
    fn test_empty_graph_roundtrip() {
        let mut buffer = Vec::new();
        save_graph(&mut buffer, &MazeGraph::new(4)).unwrap();
        assert_eq!(buffer, b"0\n");
        let loaded = load_graph(&buffer[..], 4).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.capacity(), 4);
    }

    #[test]
    fn test_semicolons_in_text_cannot_break_the_grid() {
        let mut graph = MazeGraph::new(2);
        graph
            .append(
                Room::new("Mess; Hall", "Rice; beans; regret.")
                    .with_trap("Count; to?", "three;"),
            )
            .unwrap();
        let mut buffer = Vec::new();
        save_graph(&mut buffer, &graph).unwrap();
        let loaded = load_graph(&buffer[..], 2).unwrap();
        let room = loaded.room(0).unwrap();
        assert_eq!(room.name, "Mess, Hall");
        assert_eq!(room.description, "Rice, beans, regret.");
        assert_eq!(room.trap.as_ref().unwrap().solution, "three,");
    }

    #[test]
    fn test_legacy_three_field_lines_load() {
        let text = "2\n0;Cell;A bare cell\n1;Yard;Open sky\n0 1\n";
        let loaded = load_graph(text.as_bytes(), DEFAULT_CAPACITY).unwrap();
        assert_eq!(loaded.len(), 2);
        let cell = loaded.room(0).unwrap();
        assert!(!cell.has_item && !cell.requires_item && !cell.is_exit);
        assert!(cell.trap.is_none() && cell.hint.is_none());
        assert!(loaded.has_passage(0, 1));
    }

    #[test]
    fn test_stored_ids_are_ignored_but_must_be_numeric() {
        // Shuffled ids still load in line order.
        let text = "2\n7;Cell;desc\n3;Yard;desc\n";
        let loaded = load_graph(text.as_bytes(), 2).unwrap();
        assert_eq!(loaded.room(0).unwrap().name, "Cell");
        assert_eq!(loaded.room(1).unwrap().name, "Yard");
        assert_eq!(loaded.room(1).unwrap().id, 1);

        let bad = "1\nxx;Cell;desc\n";
        assert!(matches!(
            load_graph(bad.as_bytes(), 2),
            Err(SaveError::Corrupt { line: 2, .. })
        ));
    }

    #[test]
    fn test_corrupt_inputs_abort() {
        let cases: &[(&str, usize)] = &[
            ("", 1),                               // no count at all
            ("banana\n", 1),                       // unparseable count
            ("2\n0;Cell;desc\n", 3),               // missing a room line
            ("1\n0;Cell\n", 2),                    // wrong field count
            ("1\n0;Cell;d;2;0;0;0;;;\n", 2),       // flag out of alphabet
            ("1\n0;Cell;desc\n0 one\n", 3),        // unparseable endpoint
            ("1\n0;Cell;desc\n0 1 2\n", 3),        // too many tokens
        ];
        for (text, line) in cases {
            match load_graph(text.as_bytes(), 4) {
                Err(SaveError::Corrupt { line: at, .. }) => {
                    assert_eq!(at, *line, "wrong line for input {:?}", text)
                }
                other => panic!("expected Corrupt for {:?}, got {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_out_of_range_passages_are_skipped_not_fatal() {
        let text = "2\n0;Cell;desc\n1;Yard;desc\n0 9\n0 1\n";
        let loaded = load_graph(text.as_bytes(), 2).unwrap();
        assert!(loaded.has_passage(0, 1));
        assert!(!loaded.has_passage(0, 9));
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_blank_passage_lines_are_tolerated() {
        let text = "2\n0;Cell;desc\n1;Yard;desc\n\n0 1\n\n";
        let loaded = load_graph(text.as_bytes(), 2).unwrap();
        assert!(loaded.has_passage(0, 1));
    }

    #[test]
    fn test_missing_file_is_reported_as_missing() {
        let path = std::env::temp_dir().join("oubliette-no-such-save-2b6f.txt");
        match load_from_path(&path, DEFAULT_CAPACITY) {
            Err(SaveError::Missing(reported)) => assert_eq!(reported, path),
            other => panic!("expected Missing, got {:?}", other),
        }
    }

    #[test]
    fn test_dot_export_shape() {
        let mut buffer = Vec::new();
        export_dot(&mut buffer, &sample_graph()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("graph escape_map {\n"));
        assert!(text.contains("  0 [label=\"Cell 101\"];"));
        assert!(text.contains("  0 -- 1;"));
        assert!(text.contains("  1 -- 2;"));
        assert!(!text.contains("2 -- 0"));
        assert!(text.trim_end().ends_with('}'));
    }
}
