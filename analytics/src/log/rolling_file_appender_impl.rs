// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Note that if you wrap this up in a non blocking writer, as shown below, it doesn't
/// work:
///
/// ```ignore
/// tracing_appender::non_blocking(try_create("foo")?);
/// ```
///
/// # Errors
///
/// Returns an error if the path has no parent folder or no file name.
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(&path_str);

    let parent = match path.parent() {
        Some(it) if it.as_os_str().is_empty() => std::path::Path::new("."),
        Some(it) => it,
        None => {
            return Err(miette::miette!(
                "Can't access parent folder of {}. It might not exist, or don't have required permissions.",
                path.display()
            ));
        }
    };

    let file_stem = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access file name {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    Ok(tracing_appender::rolling::never(parent, file_stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_without_file_name_is_an_error() {
        assert!(try_create("/").is_err());
    }
}
