//! Apache access rules for the uploads directory.

use crate::error::SetupError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const ACCESS_CONTROL_FILE: &str = ".htaccess";

/// Blocks script execution, serves images, disables directory listing.
pub const ACCESS_CONTROL: &str = r"
# Prevent direct access to uploaded files
<FilesMatch '\.(php|phtml|php3|php4|php5|pl|py|cgi|sh|exe)$'>
    Order Allow,Deny
    Deny from all
</FilesMatch>

# Allow image files
<FilesMatch '\.(jpg|jpeg|png|gif|webp)$'>
    Order Allow,Deny
    Allow from all
</FilesMatch>

# Prevent directory listing
Options -Indexes
";

/// Write the access rules into `uploads_dir`, replacing whatever is there.
pub fn write_access_control(uploads_dir: &Path) -> Result<PathBuf, SetupError> {
    let path = uploads_dir.join(ACCESS_CONTROL_FILE);
    fs::write(&path, ACCESS_CONTROL).map_err(SetupError::filesystem(&path))?;
    info!(path = %path.display(), "wrote access control file");
    Ok(path)
}
