use std::path::PathBuf;

use async_trait::async_trait;
use models::{ModelError, Person, RecordCodec};
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};
use tracing::{debug, info, warn};

use super::PersonStore;
use crate::errors::ServiceError;

/// Append-only text file store: one record per line, looked up by linear scan.
///
/// A missing file is an empty store; it is created together with its parent
/// directory on the first append. The lock covers this process only, so two
/// processes sharing one file can still interleave.
pub struct LineFileStore {
    path: PathBuf,
    codec: Box<dyn RecordCodec>,
    lock: RwLock<()>,
}

impl LineFileStore {
    pub fn new<P: Into<PathBuf>, C: RecordCodec + 'static>(path: P, codec: C) -> Self {
        Self { path: path.into(), codec: Box::new(codec), lock: RwLock::new(()) }
    }

    /// Invalid UTF-8 is replaced rather than failing the read, so a damaged
    /// line only affects lookups of its own name.
    async fn read_all(&self) -> Result<String, ServiceError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "backing file missing; treating as empty");
                Ok(String::new())
            }
            Err(e) => Err(ServiceError::StorageRead(e.to_string())),
        }
    }

    async fn append(&self, data: &str) -> Result<(), ServiceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::StorageWrite(e.to_string()))?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| ServiceError::StorageWrite(e.to_string()))?;
        file.write_all(data.as_bytes()).await.map_err(|e| ServiceError::StorageWrite(e.to_string()))?;
        file.flush().await.map_err(|e| ServiceError::StorageWrite(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl PersonStore for LineFileStore {
    async fn create(&self, person: Person) -> Result<Person, ServiceError> {
        let line = self.codec.encode(&person)?;

        let _guard = self.lock.write().await;
        let contents = self.read_all().await?;
        match self.codec.scan(&contents, &person.name) {
            Ok(Some(_)) => return Err(ServiceError::DuplicateKey(person.name)),
            Ok(None) => {}
            Err(ModelError::Parse { reason, .. }) => {
                warn!(name = %person.name, %reason, "existing record is corrupt; refusing duplicate");
                return Err(ServiceError::DuplicateKey(person.name));
            }
            Err(e) => return Err(e.into()),
        }

        // a hand-edited file may lack the final newline
        let sep = if contents.is_empty() || contents.ends_with('\n') { "" } else { "\n" };
        self.append(&format!("{sep}{line}\n")).await?;
        info!(name = %person.name, age = person.age, format = self.codec.name(), "person stored");
        Ok(person)
    }

    async fn find(&self, name: &str) -> Result<Person, ServiceError> {
        let _guard = self.lock.read().await;
        let contents = self.read_all().await?;
        self.codec
            .scan(&contents, name)?
            .ok_or_else(|| ServiceError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use models::{DottedCodec, JsonLinesCodec};
    use uuid::Uuid;

    use super::*;
    use crate::errors::ErrorKind;

    fn tmp_path(ext: &str) -> PathBuf {
        std::env::temp_dir().join(format!("person_db_{}.{ext}", Uuid::new_v4()))
    }

    fn person(name: &str, age: u32) -> Person {
        Person::new(name, age).unwrap()
    }

    #[tokio::test]
    async fn create_then_find_persists_dotted_lines() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("txt");
        let store = LineFileStore::new(&tmp, DottedCodec);

        // missing file reads as empty
        assert_eq!(store.find("Vanya").await.unwrap_err().kind(), ErrorKind::NotFound);

        store.create(person("Vanya", 15)).await?;
        store.create(person("Anya", 10)).await?;
        assert_eq!(store.find("Vanya").await?, person("Vanya", 15));
        assert_eq!(store.find("Anya").await?, person("Anya", 10));

        let on_disk = fs::read_to_string(&tmp).await?;
        assert_eq!(on_disk, "Vanya.15\nAnya.10\n");

        // reopen from disk
        let reopened = LineFileStore::new(&tmp, DottedCodec);
        assert_eq!(reopened.find("Anya").await?, person("Anya", 10));

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_and_not_written() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("txt");
        let store = LineFileStore::new(&tmp, DottedCodec);

        store.create(person("Vanya", 15)).await?;
        let err = store.create(person("Vanya", 20)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(fs::read_to_string(&tmp).await?, "Vanya.15\n");
        assert_eq!(store.find("Vanya").await?.age, 15);

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn unencodable_name_leaves_file_untouched() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("txt");
        let store = LineFileStore::new(&tmp, DottedCodec);

        let err = store.create(person("Dr.Who", 900)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(fs::metadata(&tmp).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_records() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("txt");
        fs::write(&tmp, "Olya.x\nVanya.15").await?;
        let store = LineFileStore::new(&tmp, DottedCodec);

        assert_eq!(store.find("Olya").await.unwrap_err().kind(), ErrorKind::ParseError);
        assert_eq!(store.create(person("Olya", 3)).await.unwrap_err().kind(), ErrorKind::DuplicateKey);

        // appending after a line without a trailing newline keeps records separate
        store.create(person("Anya", 10)).await?;
        assert_eq!(fs::read_to_string(&tmp).await?, "Olya.x\nVanya.15\nAnya.10\n");
        assert_eq!(store.find("Vanya").await?.age, 15);

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_hide_other_records() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("txt");
        fs::write(&tmp, b"Vanya.15\n\xff\xfe.3\n").await?;
        let store = LineFileStore::new(&tmp, DottedCodec);

        assert_eq!(store.find("Vanya").await?, person("Vanya", 15));
        assert_eq!(store.find("Anya").await.unwrap_err().kind(), ErrorKind::NotFound);

        store.create(person("Anya", 10)).await?;
        assert_eq!(store.find("Anya").await?, person("Anya", 10));
        let on_disk = fs::read(&tmp).await?;
        assert_eq!(on_disk, b"Vanya.15\n\xff\xfe.3\nAnya.10\n".to_vec());

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_backing_file_is_a_read_error() -> Result<(), anyhow::Error> {
        // a directory cannot be read as a file
        let dir = std::env::temp_dir().join(format!("person_db_dir_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).await?;
        let store = LineFileStore::new(&dir, DottedCodec);

        assert_eq!(store.find("Vanya").await.unwrap_err().kind(), ErrorKind::StorageRead);
        assert_eq!(store.create(person("Vanya", 1)).await.unwrap_err().kind(), ErrorKind::StorageRead);

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn json_lines_store_accepts_dotted_names() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir()
            .join(format!("person_db_nested_{}", Uuid::new_v4()))
            .join("people.jsonl");
        let store = LineFileStore::new(&tmp, JsonLinesCodec);

        store.create(person("Dr. Who", 900)).await?;
        assert_eq!(store.find("Dr. Who").await?, person("Dr. Who", 900));
        assert_eq!(fs::read_to_string(&tmp).await?, "{\"name\":\"Dr. Who\",\"age\":900}\n");

        if let Some(dir) = tmp.parent() {
            let _ = fs::remove_dir_all(dir).await;
        }
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_store_one_record() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("txt");
        let store = Arc::new(LineFileStore::new(&tmp, DottedCodec));

        let mut handles = Vec::new();
        for age in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.create(person("Vanya", age)).await }));
        }
        let mut created = 0;
        for h in handles {
            if h.await?.is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(fs::read_to_string(&tmp).await?.lines().count(), 1);

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }
}
