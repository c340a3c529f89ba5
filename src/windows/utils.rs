use widestring::U16Str;
use windows::Win32::Foundation::{GetLastError, RECT};

use crate::{error::ShotResult, monitor::Rect};

pub(super) fn wide_string_to_string(wide_string: &[u16]) -> ShotResult<String> {
    let len = wide_string
        .iter()
        .position(|pos| *pos == 0)
        .unwrap_or(wide_string.len());

    Ok(U16Str::from_slice(&wide_string[..len]).to_string()?)
}

pub(super) fn rect_from_win32(rect: RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right, rect.bottom)
}

pub(super) fn log_last_error<T: ToString>(label: T) {
    unsafe {
        let err = GetLastError();
        log::error!("{} error: {:?}", label.to_string(), err);
    }
}
