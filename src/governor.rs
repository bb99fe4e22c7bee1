use crate::{error::ControlError, profile::GovernorNode, sysfs::ControlFs};

/// Write `token` into the node's governor file.
pub fn apply(fs: &impl ControlFs, node: &GovernorNode, token: &str) -> Result<(), ControlError> {
    fs.write(&node.path, token).map_err(|source| ControlError::Write {
        path: node.path.clone(),
        source,
    })?;
    log::debug!("GOV: {} <- {}", node.path.display(), token);
    Ok(())
}

/// Select and write the governor for a boost level. Returns the token written.
pub fn apply_level<'a>(
    fs: &impl ControlFs,
    node: &'a GovernorNode,
    level: i32,
) -> Result<&'a str, ControlError> {
    let token = node.governor_for(level);
    apply(fs, node, token)?;
    Ok(token)
}
