use super::types::MonitorInfo;

/// Enumerate all monitors currently connected to the system.
///
/// Walks every active display with `EnumDisplayMonitors` and records the
/// monitor rectangle, the work area and the primary flag.
#[cfg(windows)]
pub fn enumerate_monitors() -> Vec<MonitorInfo> {
    use windows::Win32::Foundation::{LPARAM, RECT};
    use windows::Win32::Graphics::Gdi::{
        EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFOEXW,
    };

    use super::types::PixelBounds;

    const MONITORINFOF_PRIMARY: u32 = 0x1;

    fn bounds(rc: RECT) -> PixelBounds {
        PixelBounds::new(rc.left, rc.top, rc.right, rc.bottom)
    }

    unsafe extern "system" fn enum_proc(
        hmonitor: HMONITOR,
        _hdc: HDC,
        _rect: *mut RECT,
        lparam: LPARAM,
    ) -> windows::core::BOOL {
        unsafe {
            let monitors = &mut *(lparam.0 as *mut Vec<MonitorInfo>);

            let mut info = MONITORINFOEXW::default();
            info.monitorInfo.cbSize = std::mem::size_of::<MONITORINFOEXW>() as u32;

            if GetMonitorInfoW(hmonitor, &mut info as *mut _ as *mut _).as_bool() {
                let device = &info.szDevice;
                let name_len = device.iter().position(|&c| c == 0).unwrap_or(device.len());

                monitors.push(MonitorInfo {
                    name: String::from_utf16_lossy(&device[..name_len]),
                    bounds: bounds(info.monitorInfo.rcMonitor),
                    work: bounds(info.monitorInfo.rcWork),
                    primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
                });
            }

            windows::core::BOOL(1) // continue enumeration
        }
    }

    let mut monitors: Vec<MonitorInfo> = Vec::new();
    unsafe {
        let _ = EnumDisplayMonitors(
            None,
            None,
            Some(enum_proc),
            LPARAM(&mut monitors as *mut Vec<MonitorInfo> as isize),
        );
    }

    tracing::debug!(count = monitors.len(), "enumerated monitors");
    monitors
}

/// Monitor enumeration needs the Win32 display APIs; other platforms report
/// no monitors and rely on fallback metrics.
#[cfg(not(windows))]
pub fn enumerate_monitors() -> Vec<MonitorInfo> {
    tracing::debug!("monitor enumeration is unavailable on this platform");
    Vec::new()
}
