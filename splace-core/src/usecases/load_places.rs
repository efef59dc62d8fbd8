use super::prelude::*;

pub fn load_places<R: PlaceRepo>(repo: &R, filter: &PlaceFilter) -> Result<Vec<Place>> {
    log::debug!(
        "Loading places: category = {:?}, place type = {:?}",
        filter.category,
        filter.place_type
    );
    let mut places = repo.query_places(filter)?;
    // The backend already orders by rating, but the
    // order must not depend on the implementation.
    sort_by_rating_desc(&mut places);
    Ok(places)
}

#[derive(Debug, Clone)]
pub struct PlaceDetails {
    pub place: Place,
    /// Newest first
    pub comments: Vec<Comment>,
}

pub fn load_place_details<R>(repo: &R, id: &Id, min_rating: Option<StarRating>) -> Result<PlaceDetails>
where
    R: PlaceRepo + CommentRepo,
{
    let place = repo.get_place(id)?;
    let mut comments = repo.load_comments_of_place(id)?;
    if let Some(min) = min_rating {
        comments = with_min_rating(comments, min);
    }
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(PlaceDetails { place, comments })
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use splace_entities::builders::*;

    fn seed(db: &MockDb) {
        db.places.borrow_mut().extend([
            Place::build()
                .id("a")
                .category("스터디카페")
                .place_type("24시간")
                .rating(4.1)
                .finish(),
            Place::build()
                .id("b")
                .category("Cafe")
                .place_type("Quiet")
                .rating(4.8)
                .finish(),
            Place::build()
                .id("c")
                .category("스터디카페")
                .place_type("Quiet")
                .rating(3.2)
                .finish(),
        ]);
    }

    fn ids(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn load_all_places_best_rated_first() {
        let db = MockDb::default();
        seed(&db);
        let places = load_places(&db, &PlaceFilter::default()).unwrap();
        assert_eq!(vec!["b", "a", "c"], ids(&places));
    }

    #[test]
    fn load_places_by_category() {
        let db = MockDb::default();
        seed(&db);
        let places = load_places(&db, &PlaceFilter::category("스터디")).unwrap();
        assert_eq!(vec!["a", "c"], ids(&places));
    }

    #[test]
    fn load_places_by_place_type_ignoring_case() {
        let db = MockDb::default();
        seed(&db);
        let places = load_places(&db, &PlaceFilter::place_type("quiet")).unwrap();
        assert_eq!(vec!["b", "c"], ids(&places));
    }

    #[test]
    fn details_with_min_rating() {
        let db = MockDb::default();
        seed(&db);
        db.comments.borrow_mut().extend([
            Comment::build()
                .id("1")
                .place_id("a")
                .rating(StarRating::Two)
                .created_at(Timestamp::from_secs(100).unwrap())
                .finish(),
            Comment::build()
                .id("2")
                .place_id("a")
                .rating(StarRating::Four)
                .created_at(Timestamp::from_secs(200).unwrap())
                .finish(),
            Comment::build()
                .id("3")
                .place_id("a")
                .rating(StarRating::Five)
                .created_at(Timestamp::from_secs(300).unwrap())
                .finish(),
            Comment::build().id("4").place_id("b").finish(),
        ]);
        let details = load_place_details(&db, &"a".into(), None).unwrap();
        let comment_ids: Vec<_> = details.comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(vec!["3", "2", "1"], comment_ids);

        let details = load_place_details(&db, &"a".into(), Some(StarRating::Four)).unwrap();
        let comment_ids: Vec<_> = details.comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(vec!["3", "2"], comment_ids);
    }

    #[test]
    fn details_of_unknown_place() {
        let db = MockDb::default();
        assert!(matches!(
            load_place_details(&db, &"x".into(), None),
            Err(Error::Repo(crate::repositories::Error::NotFound))
        ));
    }
}
