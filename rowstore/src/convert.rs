//! Conversions between the wire messages and the table model.

use crate::proto;
use crate::table::{ColumnFamily, DisableOutcome, Mutation, RowResult};

impl From<ColumnFamily> for proto::ColumnDescriptor {
    fn from(cf: ColumnFamily) -> Self {
        Self {
            name: cf.name,
            max_versions: cf.max_versions,
            compression: cf.compression,
            in_memory: cf.in_memory,
            bloom_filter_type: cf.bloom_filter,
            block_cache_enabled: cf.block_cache,
            block_size: cf.block_size,
        }
    }
}

impl From<proto::ColumnDescriptor> for ColumnFamily {
    fn from(cd: proto::ColumnDescriptor) -> Self {
        Self {
            name: cd.name,
            block_size: cd.block_size,
            max_versions: cd.max_versions,
            in_memory: cd.in_memory,
            block_cache: cd.block_cache_enabled,
            compression: cd.compression,
            bloom_filter: cd.bloom_filter_type,
        }
    }
}

impl From<Mutation> for proto::Mutation {
    fn from(m: Mutation) -> Self {
        Self {
            column: m.column,
            value: m.value,
        }
    }
}

impl From<proto::Mutation> for Mutation {
    fn from(m: proto::Mutation) -> Self {
        Self {
            column: m.column,
            value: m.value,
        }
    }
}

impl From<RowResult> for proto::RowResult {
    fn from(r: RowResult) -> Self {
        Self {
            row: r.row,
            cells: r
                .cells
                .into_iter()
                .map(|(column, value)| proto::Cell { column, value })
                .collect(),
        }
    }
}

impl From<proto::RowResult> for RowResult {
    fn from(r: proto::RowResult) -> Self {
        Self {
            row: r.row,
            cells: r.cells.into_iter().map(|c| (c.column, c.value)).collect(),
        }
    }
}

impl From<DisableOutcome> for proto::DisableOutcome {
    fn from(outcome: DisableOutcome) -> Self {
        match outcome {
            DisableOutcome::Disabled => proto::DisableOutcome::Disabled,
            DisableOutcome::AlreadyDisabled => proto::DisableOutcome::AlreadyDisabled,
        }
    }
}

impl TryFrom<proto::DisableOutcome> for DisableOutcome {
    type Error = proto::DisableOutcome;

    fn try_from(outcome: proto::DisableOutcome) -> Result<Self, Self::Error> {
        match outcome {
            proto::DisableOutcome::Disabled => Ok(DisableOutcome::Disabled),
            proto::DisableOutcome::AlreadyDisabled => Ok(DisableOutcome::AlreadyDisabled),
            other => Err(other),
        }
    }
}
