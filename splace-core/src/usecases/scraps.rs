use super::prelude::*;

pub fn is_scrapped<R: ScrapRepo>(repo: &R, user_id: &Id, place_id: &Id) -> Result<bool> {
    let scrap = Scrap {
        user_id: user_id.clone(),
        place_id: place_id.clone(),
    };
    Ok(repo.scrap_exists(&scrap)?)
}

/// Adding an existing scrap is a no-op.
pub fn add_scrap<R: ScrapRepo>(repo: &R, user_id: &Id, place_id: &Id) -> Result<()> {
    let scrap = Scrap {
        user_id: user_id.clone(),
        place_id: place_id.clone(),
    };
    // There is no unique constraint for scraps
    if repo.scrap_exists(&scrap)? {
        log::debug!("Place {place_id} has already been scrapped by {user_id}");
        return Ok(());
    }
    repo.create_scrap(&scrap)?;
    Ok(())
}

pub fn remove_scrap<R: ScrapRepo>(repo: &R, user_id: &Id, place_id: &Id) -> Result<()> {
    let scrap = Scrap {
        user_id: user_id.clone(),
        place_id: place_id.clone(),
    };
    repo.delete_scrap(&scrap)?;
    Ok(())
}

/// Returns whether the place is scrapped afterwards.
pub fn toggle_scrap<R: ScrapRepo>(repo: &R, user_id: &Id, place_id: &Id) -> Result<bool> {
    if is_scrapped(repo, user_id, place_id)? {
        remove_scrap(repo, user_id, place_id)?;
        Ok(false)
    } else {
        add_scrap(repo, user_id, place_id)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};

    #[test]
    fn toggle_twice_restores_state() {
        let db = MockDb::default();
        let (user, place) = (Id::from("u1"), Id::from("p1"));
        assert!(!is_scrapped(&db, &user, &place).unwrap());
        assert!(toggle_scrap(&db, &user, &place).unwrap());
        assert!(is_scrapped(&db, &user, &place).unwrap());
        assert!(!toggle_scrap(&db, &user, &place).unwrap());
        assert!(!is_scrapped(&db, &user, &place).unwrap());
    }

    #[test]
    fn add_scrap_twice() {
        let db = MockDb::default();
        let (user, place) = (Id::from("u1"), Id::from("p1"));
        add_scrap(&db, &user, &place).unwrap();
        add_scrap(&db, &user, &place).unwrap();
        assert_eq!(1, db.scraps.borrow().len());
        assert_eq!(1, db.calls("create_scrap"));
    }

    #[test]
    fn remove_existing_scrap() {
        let db = MockDb::default();
        db.scraps.borrow_mut().push(Scrap {
            user_id: "u1".into(),
            place_id: "p1".into(),
        });
        remove_scrap(&db, &"u1".into(), &"p1".into()).unwrap();
        assert!(!is_scrapped(&db, &"u1".into(), &"p1".into()).unwrap());
    }

    #[test]
    fn scraps_are_scoped_by_user() {
        let db = MockDb::default();
        add_scrap(&db, &"u1".into(), &"p1".into()).unwrap();
        assert!(!is_scrapped(&db, &"u2".into(), &"p1".into()).unwrap());
    }
}
