#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderMode {
    /// Repeats the edge element (`aaa|abcd|ddd`).
    Clamp,
    /// Mirrors around the edge element without repeating it (`dcb|abcd|cba`).
    Reflect101,
}

/// Maps a possibly out-of-range index into `[0, len)`.
///
/// Returns `None` only for an empty line.
pub fn map_index(i: isize, len: usize, mode: BorderMode) -> Option<usize> {
    (len > 0).then(|| fold_index(i, len, mode))
}

/// Returns `line` extended by `before` and `after` border elements.
///
/// An empty line stays empty.
pub fn pad_line<T: Copy>(line: &[T], before: usize, after: usize, mode: BorderMode) -> Vec<T> {
    let len = line.len();
    if len == 0 {
        return Vec::new();
    }

    let first = -(before as isize);
    let last = (len + after) as isize;
    (first..last)
        .map(|i| line[fold_index(i, len, mode)])
        .collect()
}

/// `len` must be non-zero.
fn fold_index(i: isize, len: usize, mode: BorderMode) -> usize {
    match mode {
        BorderMode::Clamp => i.clamp(0, len as isize - 1) as usize,
        BorderMode::Reflect101 if len == 1 => 0,
        BorderMode::Reflect101 => {
            let period = 2 * len - 2;
            let r = i.rem_euclid(period as isize) as usize;
            if r < len { r } else { period - r }
        }
    }
}
