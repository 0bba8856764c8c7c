use super::checks;
use super::{RemarkSet, Remarks};
use crate::model::{Build, Storage};

/// Remarks for a storage drive candidate.
pub fn generate_storage_remarks(storage: &Storage, build: &Build) -> Remarks {
    let mut remarks = RemarkSet::new();
    let mobo = build.mobo.as_ref();

    remarks.add(
        "connector",
        mobo.map(|mobo| checks::storage_connector(storage, mobo)),
    );
    if checks::uses_pcie(storage) {
        remarks.add(
            "pcie",
            checks::pcie_link(
                "storage drive",
                storage.pcie_version,
                &checks::storage_hosts(build.cpu.as_ref(), mobo),
            ),
        );
    }
    remarks.add(
        "pcie_lanes",
        mobo.and_then(|mobo| checks::storage_lanes(storage, mobo)),
    );

    remarks.finish()
}
