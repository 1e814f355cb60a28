use crate::errors::{ExtractError, Result};
use crate::features::parsing::ports::SourceFrontend;
use crate::features::parsing::TypeScriptFrontend;
use std::path::Path;

/// Front-end for `path`, chosen by extension
pub fn frontend_for_file(path: &Path) -> Result<TypeScriptFrontend> {
    let frontend = TypeScriptFrontend::for_path(path);
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if frontend.supports_extension(ext) {
        Ok(frontend)
    } else {
        Err(ExtractError::unsupported(
            format!("file extension '{}'", ext),
            None,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::Dialect;

    #[test]
    fn test_frontend_by_extension() {
        assert_eq!(frontend_for_file(Path::new("a.tsx")).unwrap().dialect(), Dialect::Tsx);
        assert_eq!(frontend_for_file(Path::new("a.js")).unwrap().dialect(), Dialect::TypeScript);
        assert!(frontend_for_file(Path::new("a.py")).is_err());
    }
}
