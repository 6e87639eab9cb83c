use std::io::{BufRead, BufReader, Read};

use crate::supervisor::Supervisor;

/// Spawns a background thread that copies lines from `reader` into the
/// supervisor's ring log, tagged with `stream` (the worker label, e.g.
/// `"A"`/`"B"`/`"C"`). One of these runs per live worker's stdout/stderr
/// (spec §5 "Log reader tasks, one per live worker").
pub fn spawn_line_reader<R>(reader: R, stream: &'static str, supervisor: Supervisor)
where
    R: Read + Send + 'static,
{
    std::thread::spawn(move || {
        let mut buffered = BufReader::new(reader);
        let mut line = String::new();
        loop {
            line.clear();
            match buffered.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {
                    let text = line.trim_end_matches(['\r', '\n']);
                    if !text.is_empty() {
                        supervisor.log(stream, text.to_string());
                    }
                }
                Err(_) => break,
            }
        }
    });
}
