/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::Read;
use std::io::stdin;
use std::process::ExitCode;

use xylem::Element;
use xylem::StreamError;
use xylem::StreamHandler;
use xylem::StreamParser;

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

fn print_version() {
    println!("xylint (xylem) v{}", xylem::VERSION);
}

fn print_usage() {
    println!(
        concat!(
            "Usage: xylint [OPTIONS] [STREAM.xml...]\n",
            "This tool checks the well-formedness of XMPP stream documents.\n",
            "Options:\n",
            "  -s, --stat           Overall statistics\n",
            "  -c, --count          Stanza tag counts\n",
            "  -b, --buffer <SIZE>  File read buffer size in bytes (default: {})\n",
            "  -h, --help           Display this help message and exit\n",
            "  -v, --version        Display the version and exit\n",
            "Report issues at https://github.com/denizarkan/xylem/issues"
        ),
        DEFAULT_BUFFER_SIZE
    );
}

fn subtree_depth(element: &Element) -> usize {
    1 + element
        .children()
        .iter()
        .map(subtree_depth)
        .max()
        .unwrap_or(0)
}

struct Linter {
    do_stats: bool,
    do_tag_count: bool,
    started: bool,
    ended: bool,
    nr_stanzas: usize,
    nr_errors: usize,
    max_depth: usize,
    tag_map: HashMap<String, usize>,
}

impl Linter {
    fn new(do_stats: bool, do_tag_count: bool) -> Self {
        Linter {
            do_stats,
            do_tag_count,
            started: false,
            ended: false,
            nr_stanzas: 0,
            nr_errors: 0,
            max_depth: 0,
            tag_map: HashMap::new(),
        }
    }

    fn report(&mut self, name: &str) -> bool {
        let ok = self.started && self.nr_errors == 0;
        if !self.started {
            eprintln!("{}: no stream root found", name);
        }
        if self.do_stats {
            println!(
                "{}: {} stanzas, max stanza depth: {}, errors: {}, stream {}",
                name,
                self.nr_stanzas,
                self.max_depth,
                self.nr_errors,
                if self.ended { "closed" } else { "left open" },
            );
        }
        if self.do_tag_count {
            println!("Stanza tag counts:");
            for (tag, count) in self.tag_map.iter() {
                println!("  {}: {}", tag, count);
            }
        }
        self.started = false;
        self.ended = false;
        self.nr_stanzas = 0;
        self.nr_errors = 0;
        self.max_depth = 0;
        self.tag_map.clear();
        ok
    }
}

impl StreamHandler for Linter {
    fn handle_stream_start(&mut self, _root: &Element) {
        self.started = true;
    }

    fn handle_stream_element(&mut self, stanza: Element) -> Result<(), StreamError> {
        self.nr_stanzas += 1;
        self.max_depth = self.max_depth.max(subtree_depth(&stanza));
        if self.do_tag_count {
            *self.tag_map.entry(stanza.qualified_name()).or_insert(0) += 1;
        }
        Ok(())
    }

    fn handle_stream_end(&mut self) {
        self.ended = true;
    }

    fn handle_error(&mut self, error: &StreamError) {
        self.nr_errors += 1;
        eprintln!("stream error: {}", error);
    }
}

fn lint<R: Read>(
    mut input: R,
    name: &str,
    buffer_size: usize,
    linter: &mut Linter,
) -> Result<bool, std::io::Error> {
    let mut parser = StreamParser::new();
    let mut buffer = vec![0u8; buffer_size];
    loop {
        let nr_read = input.read(&mut buffer)?;
        if nr_read == 0 {
            break;
        }
        parser.feed(linter, &buffer[..nr_read]);
    }
    Ok(linter.report(name))
}

fn main() -> ExitCode {
    let mut do_stats = false;
    let mut do_tag_count = false;
    let mut buffer_size = DEFAULT_BUFFER_SIZE;
    let mut files: Vec<String> = Vec::new();

    let mut args = env::args();
    // Skip the first argument (program name)
    args.next();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-s" | "--stat" => do_stats = true,
            "-c" | "--count" => do_tag_count = true,
            "-b" | "--buffer" => {
                let Some(value) = args.next() else {
                    eprintln!("Error: buffer size expected after {arg}");
                    return ExitCode::FAILURE;
                };
                buffer_size = match value.parse::<usize>() {
                    Ok(size) if size > 0 => size,
                    _ => {
                        eprintln!("Error: invalid buffer size: {value}");
                        return ExitCode::FAILURE;
                    }
                };
            }
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            _ => files.push(arg),
        }
    }

    let mut linter = Linter::new(do_stats, do_tag_count);
    let mut all_ok = true;

    if files.is_empty() {
        match lint(stdin().lock(), "<stdin>", buffer_size, &mut linter) {
            Ok(ok) => all_ok = ok,
            Err(err) => {
                eprintln!("Error reading <stdin>: {err}");
                all_ok = false;
            }
        }
    } else {
        for name in &files {
            let result = match File::open(name) {
                Ok(file) => lint(file, name, buffer_size, &mut linter),
                Err(err) => {
                    eprintln!("Error opening {name}: {err}");
                    all_ok = false;
                    continue;
                }
            };
            match result {
                Ok(ok) => all_ok = all_ok && ok,
                Err(err) => {
                    eprintln!("Error reading {name}: {err}");
                    all_ok = false;
                }
            }
        }
    }

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
