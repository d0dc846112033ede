use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, Read, Write},
};

use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// A file opened by the program, buffered for its one direction.
enum OpenFile {
    Reader(BufReader<File>),
    Writer(BufWriter<File>),
}

/// The files one run has open, addressed by handle.
///
/// Handles start at 1 and are never reused within a run, so a closed handle
/// stays invalid.
#[derive(Default)]
pub struct FileTable {
    slots: Vec<Option<OpenFile>>,
}

impl FileTable {
    fn insert(&mut self, file: OpenFile) -> usize {
        self.slots.push(Some(file));
        self.slots.len()
    }

    fn get_mut(&mut self, handle: usize, position: Position) -> EvalResult<&mut OpenFile> {
        handle.checked_sub(1)
              .and_then(|slot| self.slots.get_mut(slot))
              .and_then(Option::as_mut)
              .ok_or_else(|| RuntimeError::Io { details: format!("File handle {handle} is not open."),
                                                position })
    }

    fn take(&mut self, handle: usize, position: Position) -> EvalResult<OpenFile> {
        handle.checked_sub(1)
              .and_then(|slot| self.slots.get_mut(slot))
              .and_then(Option::take)
              .ok_or_else(|| RuntimeError::Io { details: format!("File handle {handle} is not open."),
                                                position })
    }

    /// The number of files still open.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Flushes and closes every open file.
    pub fn close_all(&mut self) {
        for file in self.slots.iter_mut().filter_map(Option::take) {
            if let OpenFile::Writer(mut writer) = file {
                let _ = writer.flush();
            }
        }
    }
}

impl std::fmt::Debug for FileTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileTable")
         .field("open", &self.open_count())
         .finish()
    }
}

/// `file(path, mode)`: opens a file for reading (`"r"`), writing (`"w"`,
/// truncating) or appending (`"a"`).
///
/// Relative paths resolve against the run's working directory.
///
/// # Errors
/// - `InvalidArgument` for an unknown mode.
/// - `Io` if the file cannot be opened.
pub fn open(context: &mut Context, args: &[Value], position: Position) -> EvalResult<Value> {
    let path = args[0].as_str(position)?;
    let mode = args[1].as_str(position)?;
    let resolved = context.resolve_path(path);

    let opened = match mode {
        "r" => File::open(&resolved).map(|f| OpenFile::Reader(BufReader::new(f))),
        "w" => File::create(&resolved).map(|f| OpenFile::Writer(BufWriter::new(f))),
        "a" => OpenOptions::new().append(true)
                                 .create(true)
                                 .open(&resolved)
                                 .map(|f| OpenFile::Writer(BufWriter::new(f))),
        _ => {
            return Err(RuntimeError::InvalidArgument { details: format!("Invalid file mode '{mode}'; expected \"r\", \"w\" or \"a\"."),
                                                       position });
        },
    };

    let file = opened.map_err(|e| RuntimeError::Io { details: format!("Cannot open '{path}': {e}."),
                                                     position })?;
    Ok(Value::File(context.files.insert(file)))
}

/// `file_read(f)`: reads the rest of a file opened for reading.
pub fn read(context: &mut Context, args: &[Value], position: Position) -> EvalResult<Value> {
    let handle = handle_of(&args[0], position)?;
    let reader = reader(context, handle, position)?;

    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|e| io_error(&e, position))?;
    Ok(Value::String(text))
}

/// `file_readline(f)`: reads the next line, keeping its line terminator.
///
/// Returns the empty string at the end of the file.
pub fn read_line(context: &mut Context, args: &[Value], position: Position) -> EvalResult<Value> {
    let handle = handle_of(&args[0], position)?;
    let reader = reader(context, handle, position)?;

    let mut line = String::new();
    reader.read_line(&mut line).map_err(|e| io_error(&e, position))?;
    Ok(Value::String(line))
}

/// `file_write(f, s)`: writes a string to a file opened for writing or
/// appending.
pub fn write(context: &mut Context, args: &[Value], position: Position) -> EvalResult<Value> {
    let handle = handle_of(&args[0], position)?;
    let text = args[1].as_str(position)?;

    match context.files.get_mut(handle, position)? {
        OpenFile::Writer(writer) => {
            writer.write_all(text.as_bytes()).map_err(|e| io_error(&e, position))?;
            Ok(Value::Nil)
        },
        OpenFile::Reader(_) => Err(RuntimeError::Io { details: format!("File handle {handle} is not open for writing."),
                                                      position }),
    }
}

/// `file_close(f)`: flushes and closes a file.
///
/// # Errors
/// `Io` if the handle is already closed or the final flush fails.
pub fn close(context: &mut Context, args: &[Value], position: Position) -> EvalResult<Value> {
    let handle = handle_of(&args[0], position)?;

    if let OpenFile::Writer(mut writer) = context.files.take(handle, position)? {
        writer.flush().map_err(|e| io_error(&e, position))?;
    }
    Ok(Value::Nil)
}

fn reader(context: &mut Context,
          handle: usize,
          position: Position)
          -> EvalResult<&mut BufReader<File>> {
    match context.files.get_mut(handle, position)? {
        OpenFile::Reader(reader) => Ok(reader),
        OpenFile::Writer(_) => Err(RuntimeError::Io { details: format!("File handle {handle} is not open for reading."),
                                                      position }),
    }
}

fn handle_of(value: &Value, position: Position) -> EvalResult<usize> {
    match value {
        Value::File(handle) => Ok(*handle),
        _ => Err(RuntimeError::TypeMismatch { details: format!("Expected a file, found {}.",
                                                               value.type_name()),
                                              position }),
    }
}

fn io_error(error: &std::io::Error, position: Position) -> RuntimeError {
    RuntimeError::Io { details: format!("{error}."),
                       position }
}
