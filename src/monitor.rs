use crate::error::ShotResult;

/// `MONITORINFOF_PRIMARY`, the low-order bit of the monitor info flags.
pub const MONITORINFOF_PRIMARY: u32 = 0x1;

/// Prefix Windows puts in front of display device names, e.g. `\\.\DISPLAY1`.
pub const DEVICE_PATH_PREFIX: &str = r"\\.\";

/// A rectangle in virtual-desktop coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Rect {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_xywh(x: i32, y: i32, width: u32, height: u32) -> Rect {
        Rect {
            left: x,
            top: y,
            right: x.saturating_add_unsigned(width),
            bottom: y.saturating_add_unsigned(height),
        }
    }

    /// Negative for inverted rects. Wide enough that no edge pair overflows.
    pub fn width(&self) -> i64 {
        i64::from(self.right) - i64::from(self.left)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.bottom) - i64::from(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Right and bottom edges are exclusive.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Opaque handle to a monitor, only meaningful to the provider that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorHandle(isize);

impl MonitorHandle {
    pub const fn from_raw(raw: isize) -> MonitorHandle {
        MonitorHandle(raw)
    }

    pub const fn as_raw(&self) -> isize {
        self.0
    }
}

/// What the OS reports for one monitor handle, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorInfo {
    pub bounds: Rect,
    pub work_area: Rect,
    pub flags: u32,
    pub device_name: String,
}

/// Source of the current display topology.
pub trait MonitorProvider {
    /// Handles of every active monitor, in the order the OS delivers them.
    fn enumerate(&self) -> ShotResult<Vec<MonitorHandle>>;

    /// Fails with [`ShotError::PlatformQuery`](crate::ShotError::PlatformQuery)
    /// when the handle went stale since [`enumerate`](MonitorProvider::enumerate).
    fn query_info(&self, handle: MonitorHandle) -> ShotResult<MonitorInfo>;
}

impl<P: MonitorProvider + ?Sized> MonitorProvider for &P {
    fn enumerate(&self) -> ShotResult<Vec<MonitorHandle>> {
        (**self).enumerate()
    }

    fn query_info(&self, handle: MonitorHandle) -> ShotResult<MonitorInfo> {
        (**self).query_info(handle)
    }
}

impl<P: MonitorProvider + ?Sized> MonitorProvider for Box<P> {
    fn enumerate(&self) -> ShotResult<Vec<MonitorHandle>> {
        (**self).enumerate()
    }

    fn query_info(&self, handle: MonitorHandle) -> ShotResult<MonitorInfo> {
        (**self).query_info(handle)
    }
}

pub(crate) fn normalize_device_name(device_name: &str) -> String {
    device_name
        .strip_prefix(DEVICE_PATH_PREFIX)
        .unwrap_or(device_name)
        .to_string()
}

/// One display surface from a single enumeration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorDescriptor {
    index: usize,
    bounds: Rect,
    work_area: Rect,
    device_name: String,
    is_primary: bool,
}

impl MonitorDescriptor {
    pub(crate) fn from_info(index: usize, monitor_info: MonitorInfo) -> MonitorDescriptor {
        MonitorDescriptor {
            index,
            bounds: monitor_info.bounds,
            work_area: monitor_info.work_area,
            device_name: normalize_device_name(&monitor_info.device_name),
            is_primary: monitor_info.flags & MONITORINFOF_PRIMARY != 0,
        }
    }
}

impl MonitorDescriptor {
    /// Zero-based position in the enumeration that produced this descriptor.
    pub fn index(&self) -> usize {
        self.index
    }
    /// Device name without the `\\.\` prefix, e.g. `DISPLAY1`.
    pub fn device_name(&self) -> &str {
        &self.device_name
    }
    /// Left, top, right and bottom edges of the monitor.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
    /// The bounds minus the task bar and docked application bars.
    pub fn work_area(&self) -> Rect {
        self.work_area
    }
    /// The screen x coordinate.
    pub fn x(&self) -> i32 {
        self.bounds.left
    }
    /// The screen y coordinate.
    pub fn y(&self) -> i32 {
        self.bounds.top
    }
    /// The screen pixel width.
    pub fn width(&self) -> u32 {
        u32::try_from(self.bounds.width().max(0)).unwrap_or(u32::MAX)
    }
    /// The screen pixel height.
    pub fn height(&self) -> u32 {
        u32::try_from(self.bounds.height().max(0)).unwrap_or(u32::MAX)
    }
    /// Whether the screen is the main screen
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(flags: u32, device_name: &str) -> MonitorInfo {
        MonitorInfo {
            bounds: Rect::new(-1920, 0, 0, 1080),
            work_area: Rect::new(-1920, 0, 0, 1040),
            flags,
            device_name: device_name.to_string(),
        }
    }

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect::from_xywh(-1920, 100, 1920, 1080);
        assert_eq!(rect, Rect::new(-1920, 100, 0, 1180));
        assert_eq!(rect.width(), 1920);
        assert_eq!(rect.height(), 1080);
        assert!(!rect.is_empty());
        assert!(Rect::default().is_empty());
    }

    #[test]
    fn test_rect_extreme_edges_do_not_overflow() {
        let inverted = Rect::new(1, 0, i32::MIN, 1);
        assert_eq!(inverted.width(), i64::from(i32::MIN) - 1);
        assert!(inverted.is_empty());

        let full = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(full.width(), u32::MAX as i64);
        assert!(!full.is_empty());
    }

    #[test]
    fn test_rect_contains_excludes_far_edges() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains(0, 0));
        assert!(rect.contains(9, 9));
        assert!(!rect.contains(10, 5));
        assert!(!rect.contains(5, -1));
    }

    #[test]
    fn test_normalize_device_name_strips_prefix_once() {
        assert_eq!(normalize_device_name(r"\\.\DISPLAY1"), "DISPLAY1");
        assert_eq!(normalize_device_name(r"\\.\\\.\DISPLAY2"), r"\\.\DISPLAY2");
        assert_eq!(normalize_device_name(r"DISPLAY3\\.\"), r"DISPLAY3\\.\");
        assert_eq!(normalize_device_name(""), "");
    }

    #[test]
    fn test_descriptor_from_info() {
        let descriptor =
            MonitorDescriptor::from_info(2, info(MONITORINFOF_PRIMARY, r"\\.\DISPLAY2"));

        assert_eq!(descriptor.index(), 2);
        assert_eq!(descriptor.device_name(), "DISPLAY2");
        assert!(descriptor.is_primary());
        assert_eq!(
            (descriptor.x(), descriptor.y(), descriptor.width(), descriptor.height()),
            (-1920, 0, 1920, 1080)
        );
        assert_eq!(descriptor.work_area().height(), 1040);
    }

    #[test]
    fn test_primary_uses_low_order_bit_only() {
        assert!(!MonitorDescriptor::from_info(0, info(0, "A")).is_primary());
        assert!(!MonitorDescriptor::from_info(0, info(0x2, "A")).is_primary());
        assert!(MonitorDescriptor::from_info(0, info(0x3, "A")).is_primary());
    }
}
