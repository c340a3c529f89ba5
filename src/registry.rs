use crate::{
    error::{ShotError, ShotResult},
    monitor::{MonitorDescriptor, MonitorProvider},
};

/// Monitors from one enumeration pass, indexed by enumeration order.
///
/// Indices stay valid for the lifetime of the registry only. Build a new one
/// after the display topology changes.
#[derive(Debug, Clone, Default)]
pub struct MonitorRegistry {
    descriptors: Vec<MonitorDescriptor>,
}

impl MonitorRegistry {
    pub fn build<P: MonitorProvider + ?Sized>(provider: &P) -> ShotResult<MonitorRegistry> {
        let handles = provider.enumerate()?;
        let mut descriptors = Vec::with_capacity(handles.len());

        for (index, &handle) in handles.iter().enumerate() {
            let monitor_info = provider.query_info(handle)?;
            log::debug!(
                "monitor {}: {} {:?} flags={:#x}",
                index,
                monitor_info.device_name,
                monitor_info.bounds,
                monitor_info.flags
            );
            descriptors.push(MonitorDescriptor::from_info(index, monitor_info));
        }

        Ok(MonitorRegistry { descriptors })
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn available_indices(&self) -> Vec<usize> {
        (0..self.descriptors.len()).collect()
    }

    pub fn resolve(&self, index: usize) -> ShotResult<&MonitorDescriptor> {
        self.descriptors
            .get(index)
            .ok_or_else(|| ShotError::InvalidScreenIndex {
                requested: index,
                available: self.available_indices(),
            })
    }

    pub fn primary(&self) -> Option<&MonitorDescriptor> {
        self.descriptors.iter().find(|descriptor| descriptor.is_primary())
    }

    /// The first monitor, in index order, whose bounds contain the point.
    pub fn from_point(&self, x: i32, y: i32) -> Option<&MonitorDescriptor> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.bounds().contains(x, y))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MonitorDescriptor> {
        self.descriptors.iter()
    }

    pub fn into_descriptors(self) -> Vec<MonitorDescriptor> {
        self.descriptors
    }
}

impl<'a> IntoIterator for &'a MonitorRegistry {
    type Item = &'a MonitorDescriptor;
    type IntoIter = std::slice::Iter<'a, MonitorDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
