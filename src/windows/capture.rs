use std::mem;

use scopeguard::guard;
use windows::Win32::Graphics::Gdi::{
    BITMAPINFO, BITMAPINFOHEADER, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC,
    DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDC, GetDIBits, HBITMAP, ReleaseDC, SRCCOPY,
    SelectObject,
};

use crate::{
    capturer::CaptureBackend,
    error::{ShotError, ShotResult},
    utils::image::{padded_row_len, remove_extra_data},
};

use super::utils::log_last_error;

/// Reads the screen with `BitBlt` from the desktop DC into a memory bitmap.
#[derive(Debug, Clone, Copy, Default)]
pub struct GdiCaptureBackend;

impl CaptureBackend for GdiCaptureBackend {
    fn blit(&self, x: i32, y: i32, width: i32, height: i32) -> ShotResult<Vec<u8>> {
        capture_desktop_region(x, y, width, height)
    }
}

fn delete_bitmap_object(val: HBITMAP) {
    unsafe {
        if !DeleteObject(val.into()).as_bool() {
            log_last_error(format!("DeleteObject({:?})", val));
        }
    }
}

/// Every handle is released by its scope guard, in reverse order of
/// acquisition, whichever way this function returns.
fn capture_desktop_region(x: i32, y: i32, width: i32, height: i32) -> ShotResult<Vec<u8>> {
    unsafe {
        // DC of the whole virtual desktop
        let scope_guard_hdc_screen = guard(GetDC(None), |val| {
            if ReleaseDC(None, val) != 1 {
                log_last_error(format!("ReleaseDC({:?})", val));
            }
        });
        if scope_guard_hdc_screen.is_invalid() {
            return Err(ShotError::Capture("GetDC failed".to_string()));
        }

        // https://learn.microsoft.com/en-us/windows/win32/api/wingdi/nf-wingdi-createcompatibledc
        let scope_guard_hdc_mem = guard(CreateCompatibleDC(Some(*scope_guard_hdc_screen)), |val| {
            if !DeleteDC(val).as_bool() {
                log_last_error(format!("DeleteDC({:?})", val));
            }
        });
        if scope_guard_hdc_mem.is_invalid() {
            return Err(ShotError::Capture("CreateCompatibleDC failed".to_string()));
        }

        let scope_guard_h_bitmap = guard(
            CreateCompatibleBitmap(*scope_guard_hdc_screen, width, height),
            delete_bitmap_object,
        );
        if scope_guard_h_bitmap.is_invalid() {
            return Err(ShotError::Capture(format!(
                "CreateCompatibleBitmap({}x{}) failed",
                width, height
            )));
        }

        {
            let hdc_mem = *scope_guard_hdc_mem;
            let previous_object = SelectObject(hdc_mem, (*scope_guard_h_bitmap).into());
            if previous_object.is_invalid() {
                return Err(ShotError::Capture("SelectObject failed".to_string()));
            }
            // GetDIBits needs the bitmap deselected again
            let _scope_guard_selection = guard(previous_object, |val| {
                SelectObject(hdc_mem, val);
            });

            // no scaling, so BitBlt rather than StretchBlt
            BitBlt(
                hdc_mem,
                0,
                0,
                width,
                height,
                Some(*scope_guard_hdc_screen),
                x,
                y,
                SRCCOPY,
            )
            .map_err(|err| ShotError::Capture(format!("BitBlt failed: {err}")))?;
        }

        let bytes_per_row = padded_row_len(width as usize);
        let mut bitmap_info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                // negative height asks for top-down rows
                biHeight: -height,
                biPlanes: 1,
                biBitCount: 24,
                biCompression: 0,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut buffer = vec![0u8; bytes_per_row * height as usize];

        let lines = GetDIBits(
            *scope_guard_hdc_mem,
            *scope_guard_h_bitmap,
            0,
            height as u32,
            Some(buffer.as_mut_ptr().cast()),
            &mut bitmap_info,
            DIB_RGB_COLORS,
        );
        if lines != height {
            return Err(ShotError::Capture(format!(
                "GetDIBits copied {} of {} lines",
                lines, height
            )));
        }

        Ok(remove_extra_data(width as usize, height as usize, bytes_per_row, buffer))
    }
}
