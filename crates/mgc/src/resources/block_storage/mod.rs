//! Block storage API endpoints

mod schedulers;
mod volume_types;
mod volumes;

pub use schedulers::{
    CreateSchedulerRequest, DailyFrequency, Frequency, ListSchedulersOptions, Scheduler,
    SchedulerExpand, SchedulerList, SchedulerPolicy, SchedulerState, Schedulers, SnapshotConfig,
};
pub use volume_types::{
    ListVolumeTypesOptions, VolumeTypeFilter, VolumeTypeInfo, VolumeTypeList, VolumeTypes,
};
pub use volumes::{
    AttachmentInstance, CreateVolumeRequest, IdOrName, Iops, ListVolumesOptions, Volume,
    VolumeAttachment, VolumeError, VolumeExpand, VolumeList, VolumeType, Volumes,
};

use crate::client::Transport;

/// Block storage API resource.
#[derive(Clone, Debug)]
pub struct BlockStorage {
    transport: Transport,
}

resource!(BlockStorage);

impl BlockStorage {
    /// Volumes.
    pub fn volumes(&self) -> Volumes {
        Volumes::new(self.transport.clone())
    }

    /// Volume types offered in the region.
    pub fn volume_types(&self) -> VolumeTypes {
        VolumeTypes::new(self.transport.clone())
    }

    /// Snapshot schedulers.
    pub fn schedulers(&self) -> Schedulers {
        Schedulers::new(self.transport.clone())
    }
}
