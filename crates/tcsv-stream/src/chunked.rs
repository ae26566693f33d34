// Dweve TCSV - Typed CSV Parsing
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Chunked parallel parsing.
//!
//! [`ChunkedParser`] reads the header once, then splits the remaining lines
//! into fixed-size chunks and parses each chunk on a `rayon` pool against the
//! shared header. Finished chunks come back through a bounded channel and are
//! re-ordered, so rows are yielded in input order while later chunks are
//! still being parsed.
//!
//! Memory is bounded by `max_in_flight * chunk_size` lines: the dispatcher
//! needs a permit per chunk and a permit is only returned once the consumer
//! has taken that chunk's rows.
//!
//! With multi-line strings enabled a chunk only ends on a line that leaves no
//! quoted span open, so it can grow past `chunk_size` to keep a value whole.
//! An unclosed quote pulls the rest of the input into one chunk.
//!
//! Diagnostics are buffered per chunk and reported on the consuming thread
//! when that chunk is taken, so they arrive in input order.
//!
//! ```rust
//! use tcsv_core::ParserConfig;
//! use tcsv_stream::{ChunkConfig, ChunkedParser};
//! use std::io::Cursor;
//!
//! let mut input = String::from("id,name\n");
//! for i in 0..10 {
//!     input.push_str(&format!("{i},n{i}\n"));
//! }
//!
//! let config = ChunkConfig::new(ParserConfig::strict()).chunk_size(3).max_threads(2);
//! let ids: Vec<String> = ChunkedParser::new(Cursor::new(input), config)
//!     .unwrap()
//!     .map(|row| row.unwrap().values()[0].text().to_string())
//!     .collect();
//!
//! assert_eq!(ids, (0..10).map(|i| i.to_string()).collect::<Vec<_>>());
//! ```

use crate::error::{StreamError, StreamResult};
use crate::reader::{LineReader, DEFAULT_BUFFER_SIZE};
use crossbeam_channel::{bounded, Receiver, Sender};
use rayon::ThreadPool;
use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;
use std::thread::JoinHandle;
use tcsv_core::lex::{IterLines, LineSource};
use tcsv_core::{
    CollectedDiagnostics, CsvResult, Diagnostic, DiagnosticSink, Header, Parser, ParserConfig,
    Row, StderrSink,
};
use tracing::debug;

/// Default number of physical lines per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 2000;

/// Configuration for [`ChunkedParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Applied to the header and to every chunk.
    pub parser: ParserConfig,

    /// Physical lines per chunk.
    ///
    /// Default: 2000
    pub chunk_size: usize,

    /// Worker threads. `None` uses the available parallelism.
    ///
    /// Default: None
    pub max_threads: Option<usize>,

    /// Chunks dispatched but not yet consumed. `None` means twice the
    /// number of threads.
    ///
    /// Default: None
    pub max_in_flight: Option<usize>,

    /// Read buffer size in bytes.
    ///
    /// Default: 64 KiB
    pub buffer_size: usize,
}

impl ChunkConfig {
    /// Defaults for everything but the parser configuration.
    pub fn new(parser: ParserConfig) -> Self {
        Self {
            parser,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_threads: None,
            max_in_flight: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Set the number of physical lines per chunk.
    pub fn chunk_size(mut self, lines: usize) -> Self {
        self.chunk_size = lines;
        self
    }

    /// Set the worker thread count.
    pub fn max_threads(mut self, threads: usize) -> Self {
        self.max_threads = Some(threads);
        self
    }

    /// Set how many chunks may be dispatched but not yet consumed.
    pub fn max_in_flight(mut self, chunks: usize) -> Self {
        self.max_in_flight = Some(chunks);
        self
    }

    /// Set the read buffer size in bytes.
    pub fn buffer_size(mut self, bytes: usize) -> Self {
        self.buffer_size = bytes;
        self
    }

    /// Worker thread count after defaults are applied.
    pub fn threads(&self) -> usize {
        self.max_threads
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .max(1)
    }

    /// In-flight chunk bound after defaults are applied.
    pub fn in_flight(&self) -> usize {
        self.max_in_flight.unwrap_or(2 * self.threads()).max(1)
    }
}

/// Lines of one chunk, numbered from their position in the whole input.
#[derive(Debug, Clone)]
pub struct ChunkLines {
    lines: IterLines<std::vec::IntoIter<String>>,
}

impl ChunkLines {
    /// Wrap `lines`, the first of which is line `first_line` of the input.
    pub fn new(lines: Vec<String>, first_line: usize) -> Self {
        Self {
            lines: IterLines::new(lines).starting_at(first_line),
        }
    }
}

impl LineSource for ChunkLines {
    fn next_line(&mut self) -> CsvResult<Option<String>> {
        self.lines.next_line()
    }

    fn first_line(&self) -> usize {
        self.lines.first_line()
    }
}

/// What a worker (or the dispatcher, on a read failure) hands back.
struct ChunkOutcome {
    index: usize,
    rows: Vec<Row>,
    diagnostics: Vec<Diagnostic>,
    error: Option<StreamError>,
    had_errors: bool,
}

impl ChunkOutcome {
    fn failed(index: usize, error: StreamError) -> Self {
        Self {
            index,
            rows: Vec::new(),
            diagnostics: Vec::new(),
            error: Some(error),
            had_errors: false,
        }
    }
}

/// Everything a worker needs besides its lines.
#[derive(Debug, Clone)]
struct ChunkContext {
    header: Arc<Header>,
    config: ParserConfig,
}

impl ChunkContext {
    fn parse(&self, index: usize, lines: ChunkLines) -> ChunkOutcome {
        let first_line = lines.first_line();
        let collected = CollectedDiagnostics::new();
        let mut parser =
            Parser::with_header_from_source(Arc::clone(&self.header), lines, self.config)
                .with_sink(Box::new(collected.clone()));

        let mut rows = Vec::new();
        let mut error = None;
        for row in parser.by_ref() {
            match row {
                Ok(row) => rows.push(row),
                Err(e) => {
                    error = Some(StreamError::Csv(e));
                    break;
                }
            }
        }

        debug!(
            "Chunk {} (from line {}) parsed {} rows",
            index,
            first_line,
            rows.len()
        );
        ChunkOutcome {
            index,
            rows,
            diagnostics: collected.snapshot(),
            error,
            had_errors: parser.had_errors(),
        }
    }
}

/// Channels and thread of a running dispatch.
struct Running {
    results: Receiver<ChunkOutcome>,
    permits: Sender<()>,
    /// Consumer-side handle on the permit queue, used to revoke unused permits.
    unused_permits: Receiver<()>,
    dispatcher: Option<JoinHandle<()>>,
}

/// Parallel, order-preserving typed CSV parser over a [`Read`].
///
/// Implements `Iterator<Item = StreamResult<Row>>` with the same rows, errors
/// and diagnostics as a single [`Parser`] over the same input. Work starts on
/// the first call to `next`.
pub struct ChunkedParser<R: Read + Send + 'static> {
    header: Arc<Header>,
    config: ChunkConfig,
    sink: Box<dyn DiagnosticSink>,
    reader: Option<LineReader<R>>,
    running: Option<Running>,
    reorder: BTreeMap<usize, ChunkOutcome>,
    next_index: usize,
    current: std::vec::IntoIter<Row>,
    pending_error: Option<StreamError>,
    had_errors: bool,
    finished: bool,
}

impl<R: Read + Send + 'static> ChunkedParser<R> {
    /// Read and parse the header line. Chunks are dispatched lazily.
    pub fn new(reader: R, config: ChunkConfig) -> StreamResult<Self> {
        let mut reader = LineReader::with_capacity(reader, config.buffer_size);
        let first = reader.next_raw_line()?.map(|(_, line)| line);
        let header = Parser::new(first, config.parser)?.header().clone();
        debug!("Chunked parser header has {} columns", header.column_count());

        Ok(Self {
            header,
            config,
            sink: Box::new(StderrSink),
            reader: Some(reader),
            running: None,
            reorder: BTreeMap::new(),
            next_index: 0,
            current: Vec::new().into_iter(),
            pending_error: None,
            had_errors: false,
            finished: false,
        })
    }

    /// Send bad-line diagnostics to `sink` instead of standard error.
    ///
    /// The sink stays on the consuming thread; workers buffer their
    /// diagnostics until their chunk is taken.
    pub fn with_sink(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Header shared by every chunk.
    #[inline]
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Configuration this parser was built with.
    #[inline]
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// `true` once a consumed chunk dropped a line in warning mode.
    #[inline]
    pub fn had_errors(&self) -> bool {
        self.had_errors
    }

    fn start(&mut self, reader: LineReader<R>) -> StreamResult<Running> {
        let threads = self.config.threads();
        let in_flight = self.config.in_flight();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("tcsv-chunk-{i}"))
            .build()
            .map_err(|e| StreamError::worker(e.to_string()))?;

        let (result_tx, results) = bounded(in_flight);
        let (permits, permit_rx) = bounded::<()>(in_flight);
        for _ in 0..in_flight {
            // Cannot fail: the channel holds exactly `in_flight` permits.
            let _ = permits.send(());
        }

        let context = ChunkContext {
            header: Arc::clone(&self.header),
            config: self.config.parser,
        };
        let chunk_size = self.config.chunk_size.max(1);

        debug!(
            "Starting chunked parse: {} threads, {} chunks in flight, {} lines per chunk",
            threads, in_flight, chunk_size
        );

        let unused_permits = permit_rx.clone();
        let dispatcher = std::thread::Builder::new()
            .name("tcsv-dispatch".to_string())
            .spawn(move || dispatch(reader, pool, context, chunk_size, result_tx, permit_rx))
            .map_err(|e| StreamError::worker(e.to_string()))?;

        Ok(Running {
            results,
            permits,
            unused_permits,
            dispatcher: Some(dispatcher),
        })
    }

    /// Next chunk in input order, `None` once every chunk was consumed.
    fn next_chunk(&mut self) -> StreamResult<Option<ChunkOutcome>> {
        if let Some(reader) = self.reader.take() {
            self.running = Some(self.start(reader)?);
        }
        let Some(running) = self.running.as_ref() else {
            return Ok(None);
        };

        loop {
            if let Some(outcome) = self.reorder.remove(&self.next_index) {
                self.next_index += 1;
                // The dispatcher may already be gone.
                let _ = running.permits.send(());
                return Ok(Some(outcome));
            }

            match running.results.recv() {
                Ok(outcome) => {
                    self.reorder.insert(outcome.index, outcome);
                }
                Err(_) if self.reorder.is_empty() => return Ok(None),
                Err(_) => {
                    return Err(StreamError::worker(format!(
                        "chunk {} was lost",
                        self.next_index
                    )))
                }
            }
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        self.current = Vec::new().into_iter();
        self.reorder.clear();
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(mut running) = self.running.take() {
            // Take back every permit the dispatcher has not used yet, so no
            // further chunk is read once the consumer is gone.
            let revoked = running.unused_permits.try_iter().count();
            debug!("Stopping dispatch, revoked {} unused permits", revoked);

            let dispatcher = running.dispatcher.take();
            drop(running);
            if let Some(handle) = dispatcher {
                if handle.join().is_err() {
                    debug!("Chunk dispatcher panicked");
                }
            }
        }
    }
}

/// Dispatcher loop: cut the input into chunks and spawn one job per chunk.
fn dispatch<R: Read>(
    mut reader: LineReader<R>,
    pool: ThreadPool,
    context: ChunkContext,
    chunk_size: usize,
    results: Sender<ChunkOutcome>,
    permits: Receiver<()>,
) {
    let mut index = 0;
    let multiline = context.config.allow_multiline_strings;

    loop {
        let mut lines = Vec::with_capacity(chunk_size);
        let mut first_line = reader.line_number() + 1;
        let mut read_error = None;
        let mut in_quotes = false;
        let mut done = false;

        while lines.len() < chunk_size || in_quotes {
            match reader.next_raw_line() {
                Ok(Some((number, line))) => {
                    if lines.is_empty() {
                        first_line = number;
                    }
                    if multiline {
                        in_quotes = leaves_quote_open(&line, in_quotes);
                    }
                    lines.push(line);
                }
                Ok(None) => {
                    done = true;
                    break;
                }
                Err(e) => {
                    read_error = Some(e);
                    break;
                }
            }
        }

        if lines.len() > chunk_size {
            debug!(
                "Chunk {} extended to {} lines to keep a quoted value whole",
                index,
                lines.len()
            );
        }
        let done = done || read_error.is_some();

        if !lines.is_empty() {
            if permits.recv().is_err() {
                debug!("Consumer gone, stopping dispatch at chunk {}", index);
                return;
            }
            let context = context.clone();
            let results = results.clone();
            let chunk = ChunkLines::new(lines, first_line);
            let chunk_index = index;
            pool.spawn(move || {
                let outcome = context.parse(chunk_index, chunk);
                let _ = results.send(outcome);
            });
            index += 1;
        }

        if let Some(error) = read_error {
            if permits.recv().is_ok() {
                let _ = results.send(ChunkOutcome::failed(index, error));
            }
            return;
        }

        if done {
            debug!("Dispatched {} chunks", index);
            return;
        }
    }
}

/// Quote state after `line`, given the state before it.
///
/// Every `"` toggles the quoted span, wherever it sits in a value.
fn leaves_quote_open(line: &str, in_quotes: bool) -> bool {
    let quotes = line.bytes().filter(|&b| b == b'"').count();
    in_quotes ^ (quotes % 2 == 1)
}

impl<R: Read + Send + 'static> Iterator for ChunkedParser<R> {
    type Item = StreamResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            if let Some(row) = self.current.next() {
                return Some(Ok(row));
            }

            if let Some(error) = self.pending_error.take() {
                self.finish();
                return Some(Err(error));
            }

            match self.next_chunk() {
                Ok(Some(outcome)) => {
                    for diagnostic in &outcome.diagnostics {
                        self.sink.report(diagnostic);
                    }
                    self.had_errors |= outcome.had_errors;
                    self.current = outcome.rows.into_iter();
                    self.pending_error = outcome.error;
                }
                Ok(None) => {
                    self.finish();
                    return None;
                }
                Err(error) => {
                    self.finish();
                    return Some(Err(error));
                }
            }
        }
    }
}

impl<R: Read + Send + 'static> Drop for ChunkedParser<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Parse `input` on a worker pool and collect every row, stopping at the
/// first error.
pub fn parse_chunked<R: Read + Send + 'static>(
    input: R,
    config: ChunkConfig,
) -> StreamResult<Vec<Row>> {
    ChunkedParser::new(input, config)?.collect()
}
