use jfs::Store;
use splace_entities::session::Session;
use std::{
    io::{self, ErrorKind},
    path::Path,
};

const KEY_CURRENT: &str = "current-session";

/// Persists the session of the signed in user between
/// two invocations as a JSON file.
#[derive(Clone)]
pub struct SessionStore {
    json_store: Store,
}

impl SessionStore {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }

    pub fn path(&self) -> &Path {
        self.json_store.path()
    }

    pub fn load(&self) -> crate::Result<Option<Session>> {
        let row = match self.json_store.get::<splace_boundary::Session>(KEY_CURRENT) {
            Ok(row) => row,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(row.try_into()?))
    }

    pub fn save(&self, session: &Session) -> io::Result<()> {
        let row = splace_boundary::Session::from(session);
        self.json_store.save_with_id(&row, KEY_CURRENT)?;
        log::debug!("Stored session of user {}", session.user.id);
        Ok(())
    }

    pub fn clear(&self) -> io::Result<()> {
        match self.json_store.delete(KEY_CURRENT) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use splace_entities::{builders::*, time::Timestamp};
    use std::{
        env, fs,
        path::PathBuf,
        sync::atomic::{AtomicUsize, Ordering},
    };

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    pub struct TempDir(PathBuf);

    impl TempDir {
        pub fn new() -> Self {
            let n = COUNTER.fetch_add(1, Ordering::SeqCst);
            let dir = env::temp_dir().join(format!("splace-sessions-{}-{n}", std::process::id()));
            Self(dir)
        }

        pub fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn nothing_stored() {
        let dir = TempDir::new();
        let store = SessionStore::try_new(dir.path()).unwrap();
        assert_eq!(None, store.load().unwrap());
        assert!(store.clear().is_ok());
    }

    #[test]
    fn store_and_clear_session() {
        let dir = TempDir::new();
        let store = SessionStore::try_new(dir.path()).unwrap();
        let session = Session::build()
            .user_id("u1")
            .access_token("jwt")
            .expires_at(Timestamp::from_secs(1_700_003_600))
            .finish();
        store.save(&session).unwrap();
        assert_eq!(Some(session), store.load().unwrap());
        store.clear().unwrap();
        assert_eq!(None, store.load().unwrap());
    }
}
