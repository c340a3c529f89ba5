use std::{ffi::c_void, mem};

use windows::{
    Win32::{
        Foundation::{LPARAM, RECT},
        Graphics::Gdi::{
            EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
        },
    },
    core::BOOL,
};

use crate::{
    error::{ShotError, ShotResult},
    monitor::{MonitorHandle, MonitorInfo, MonitorProvider},
};

use super::utils::{rect_from_win32, wide_string_to_string};

/// Monitor topology from `EnumDisplayMonitors` and `GetMonitorInfoW`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GdiMonitorProvider;

extern "system" fn monitor_enum_proc(
    hmonitor: HMONITOR,
    _: HDC,
    _: *mut RECT,
    state: LPARAM,
) -> BOOL {
    unsafe {
        let handles = &mut *(state.0 as *mut Vec<MonitorHandle>);
        handles.push(MonitorHandle::from_raw(hmonitor.0 as isize));
    }

    BOOL::from(true)
}

impl MonitorProvider for GdiMonitorProvider {
    fn enumerate(&self) -> ShotResult<Vec<MonitorHandle>> {
        let mut handles: Vec<MonitorHandle> = Vec::new();

        unsafe {
            EnumDisplayMonitors(
                None,
                None,
                Some(monitor_enum_proc),
                LPARAM(&mut handles as *mut Vec<MonitorHandle> as isize),
            )
            .ok()
            .map_err(|err| {
                ShotError::PlatformQuery(format!("EnumDisplayMonitors failed: {err}"))
            })?;
        }

        Ok(handles)
    }

    fn query_info(&self, handle: MonitorHandle) -> ShotResult<MonitorInfo> {
        let hmonitor = HMONITOR(handle.as_raw() as *mut c_void);

        let mut monitor_info_ex_w = MONITORINFOEXW::default();
        monitor_info_ex_w.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;
        let monitor_info_ex_w_ptr =
            &mut monitor_info_ex_w as *mut MONITORINFOEXW as *mut MONITORINFO;

        // https://learn.microsoft.com/en-us/windows/win32/api/winuser/nf-winuser-getmonitorinfow
        unsafe { GetMonitorInfoW(hmonitor, monitor_info_ex_w_ptr) }
            .ok()
            .map_err(|err| {
                ShotError::PlatformQuery(format!("GetMonitorInfoW({:?}) failed: {err}", hmonitor))
            })?;

        let monitor_info = monitor_info_ex_w.monitorInfo;

        Ok(MonitorInfo {
            bounds: rect_from_win32(monitor_info.rcMonitor),
            work_area: rect_from_win32(monitor_info.rcWork),
            flags: monitor_info.dwFlags,
            device_name: wide_string_to_string(&monitor_info_ex_w.szDevice)?,
        })
    }
}
