//! Git plumbing for plugin repositories

use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{AutotagOption, FetchOptions, Repository};

use crate::{Error, Result};

/// Remote every plugin clone tracks.
pub const REMOTE_NAME: &str = "origin";

/// Clone `url` into `dest`, creating parent directories as needed.
pub fn clone_repo(url: &str, dest: &Path) -> Result<Repository> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| asdf_fs::Error::io(parent, e))?;
    }

    RepoBuilder::new()
        .clone(url, dest)
        .map_err(|source| Error::CloneFailed {
            url: url.to_string(),
            source,
        })
}

/// Open the repository rooted exactly at `dir` (no parent discovery).
pub fn open(dir: &Path) -> Result<Repository> {
    Repository::open(dir).map_err(|source| Error::GitRepository {
        path: dir.to_path_buf(),
        source,
    })
}

/// URL of the `origin` remote, if configured.
pub fn remote_url(repo: &Repository) -> Result<Option<String>> {
    match repo.find_remote(REMOTE_NAME) {
        Ok(remote) => Ok(remote.url().map(str::to_string)),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Hash of the commit currently checked out.
pub fn head_ref(repo: &Repository) -> Result<String> {
    let commit = repo.head()?.peel_to_commit()?;
    Ok(commit.id().to_string())
}

/// Fetch from `origin` and move the working tree.
///
/// With `git_ref` set, checks out that ref (remote branch, tag or commit)
/// with a detached HEAD. Without it, fast-forwards the remote's default
/// branch and checks it out. Returns the resulting commit hash.
pub fn update(repo: &Repository, git_ref: Option<&str>) -> Result<String> {
    let mut remote = repo.find_remote(REMOTE_NAME)?;
    let mut fetch_opts = FetchOptions::new();
    fetch_opts.download_tags(AutotagOption::All);
    remote.fetch::<&str>(&[], Some(&mut fetch_opts), None)?;

    match git_ref {
        Some(git_ref) => checkout_detached(repo, git_ref)?,
        None => checkout_default_branch(repo)?,
    }

    head_ref(repo)
}

fn checkout_detached(repo: &Repository, git_ref: &str) -> Result<()> {
    // Prefer the freshly fetched remote branch over a stale local one
    let object = repo
        .revparse_single(&format!("{REMOTE_NAME}/{git_ref}"))
        .or_else(|_| repo.revparse_single(git_ref))?;
    let commit = object.peel_to_commit()?;

    repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))?;
    repo.set_head_detached(commit.id())?;
    Ok(())
}

fn checkout_default_branch(repo: &Repository) -> Result<()> {
    let branch = default_branch(repo)?;
    let remote_ref = repo.find_reference(&format!("refs/remotes/{REMOTE_NAME}/{branch}"))?;
    let target = remote_ref.peel_to_commit()?;

    let local_ref = format!("refs/heads/{branch}");
    repo.reference(
        &local_ref,
        target.id(),
        true,
        &format!("update: fast-forward to {}", target.id()),
    )?;
    repo.set_head(&local_ref)?;
    repo.checkout_head(Some(CheckoutBuilder::default().force()))?;
    Ok(())
}

/// Name of the branch `origin/HEAD` points at, falling back to the branch
/// currently checked out.
fn default_branch(repo: &Repository) -> Result<String> {
    let remote_head = format!("refs/remotes/{REMOTE_NAME}/HEAD");
    let remote_prefix = format!("refs/remotes/{REMOTE_NAME}/");

    if let Ok(reference) = repo.find_reference(&remote_head)
        && let Some(target) = reference.symbolic_target()
        && let Some(branch) = target.strip_prefix(&remote_prefix)
    {
        return Ok(branch.to_string());
    }

    let head = repo.head()?;
    if head.is_branch()
        && let Some(branch) = head.shorthand()
    {
        return Ok(branch.to_string());
    }

    Err(Error::Git(git2::Error::from_str(
        "unable to determine the default branch of origin",
    )))
}
