use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use crate::error::DispatchError;
use crate::model::{Category, Entry};
use log::{info, debug, warn};
use zip::result::{ZipError, ZipResult};

/// What selecting an entry resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenUrl(String),
    RunExecutable(PathBuf),
    ExtractThenRun { zip_path: PathBuf, exe_path: PathBuf },
    ReportUnavailable(Unavailable),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    NoUrl,
    Missing { download_url: Option<String> },
}

/// What a successful dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    OpenedUrl(String),
    Launched(PathBuf),
    ExtractedAndLaunched { dir: PathBuf, exe_path: PathBuf },
}

/// Side effects the dispatcher needs from the platform.
pub trait Launcher {
    fn open_url(&mut self, url: &str) -> io::Result<()>;

    /// Starts `path` without waiting on it or capturing its output.
    fn spawn_detached(&mut self, path: &Path) -> io::Result<()>;
}

impl<T: Launcher + ?Sized> Launcher for &mut T {
    fn open_url(&mut self, url: &str) -> io::Result<()> {
        (**self).open_url(url)
    }

    fn spawn_detached(&mut self, path: &Path) -> io::Result<()> {
        (**self).spawn_detached(path)
    }
}

pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open_url(&mut self, url: &str) -> io::Result<()> {
        open::that(url)
    }

    fn spawn_detached(&mut self, path: &Path) -> io::Result<()> {
        // The child starts in the executable's directory, so a relative path would
        // no longer point at it.
        let path = std::path::absolute(path)?;
        let mut command = Command::new(&path);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            command.current_dir(dir);
        }

        // Own process group so a Ctrl-C at our prompt does not reach the tool.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        // The child is intentionally never waited on.
        command.spawn()?;
        Ok(())
    }
}

/// Decides what to do with `entry`. Tool paths resolve against `base_dir`,
/// normally the directory of the entry's JSON file.
pub fn resolve(category: Category, entry: &Entry, base_dir: &Path) -> Action {
    match category {
        Category::Github | Category::Website => match entry.url() {
            Some(url) => Action::OpenUrl(url.to_string()),
            None => Action::ReportUnavailable(Unavailable::NoUrl),
        },
        Category::Tools => {
            let exe_path = entry.exe_path().map(|p| base_dir.join(p));
            let zip_path = entry.zip_path().map(|p| base_dir.join(p));

            match (exe_path, zip_path) {
                (Some(exe), _) if exe.exists() => Action::RunExecutable(exe),
                (Some(exe), Some(zip)) if zip.exists() => Action::ExtractThenRun {
                    zip_path: zip,
                    exe_path: exe,
                },
                _ => Action::ReportUnavailable(Unavailable::Missing {
                    download_url: entry.download_url().map(str::to_string),
                }),
            }
        }
    }
}

pub fn perform<L: Launcher>(action: &Action, launcher: &mut L) -> Result<Dispatched, DispatchError> {
    info!("Dispatching {:?}", action);
    match action {
        Action::OpenUrl(url) => {
            launcher.open_url(url).map_err(|source| DispatchError::OpenUrl {
                url: url.clone(),
                source,
            })?;
            Ok(Dispatched::OpenedUrl(url.clone()))
        }
        Action::RunExecutable(path) => {
            launch(path, launcher)?;
            Ok(Dispatched::Launched(path.clone()))
        }
        Action::ExtractThenRun { zip_path, exe_path } => {
            let dir = zip_path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
            extract_archive(zip_path, &dir)?;
            if !exe_path.exists() {
                return Err(DispatchError::MissingAfterExtract { path: exe_path.clone() });
            }
            launch(exe_path, launcher)?;
            Ok(Dispatched::ExtractedAndLaunched { dir, exe_path: exe_path.clone() })
        }
        Action::ReportUnavailable(Unavailable::NoUrl) => Err(DispatchError::NoUrl),
        Action::ReportUnavailable(Unavailable::Missing { download_url }) => {
            Err(DispatchError::Unavailable { download_url: download_url.clone() })
        }
    }
}

fn launch<L: Launcher>(path: &Path, launcher: &mut L) -> Result<(), DispatchError> {
    launcher.spawn_detached(path).map_err(|source| DispatchError::Launch {
        path: path.to_path_buf(),
        source,
    })
}

/// Unpacks `zip_path` into `output_dir`, overwriting existing files.
/// Returns the number of files written.
pub fn extract_archive(zip_path: &Path, output_dir: &Path) -> Result<usize, DispatchError> {
    unpack(zip_path, output_dir).map_err(|source| {
        let permission = matches!(&source, ZipError::Io(e) if e.kind() == io::ErrorKind::PermissionDenied);
        let path = zip_path.to_path_buf();
        if permission {
            DispatchError::ExtractPermission { path, source }
        } else {
            DispatchError::Extract { path, source }
        }
    })
}

fn unpack(zip_path: &Path, output_dir: &Path) -> ZipResult<usize> {
    let file = File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    fs::create_dir_all(output_dir)?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let Some(relative) = file.enclosed_name() else {
            warn!("Skipping unsafe archive entry '{}'", file.name());
            continue;
        };
        let outpath = output_dir.join(relative);

        if file.is_dir() {
            fs::create_dir_all(&outpath)?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut outfile = File::create(&outpath)?;
        io::copy(&mut file, &mut outfile)?;
        debug!("Extracted {:?}", outpath);
        written += 1;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Owner keeps write access so a later extraction can overwrite the file.
            if let Some(mode) = file.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode | 0o200))?;
            }
        }
    }

    info!("Extracted {} files from {:?} into {:?}", written, zip_path, output_dir);
    Ok(written)
}
