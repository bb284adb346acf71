mod poller;

pub use poller::{PollerState, StatusPoller, STATUS_PATH};
