//! Sample data the prototype runs on
//!
//! Everything is built fresh on each call. Timestamps are relative to the
//! `now` passed in so tests can pin the clock.

use crate::koala::catalog::{Book, BookRef, BookStatus, Library};
use crate::koala::directory::FriendLibrary;
use crate::koala::feed::{Activity, ActivityKind};
use crate::koala::types::{GeoPoint, User};
use chrono::{DateTime, Duration, Utc};

/// The profile owner
pub fn current_user() -> User {
    User::named("me", "Alex Johnson", "+1 (555) 123-4567")
}

fn friend(id: &str, name: &str, n: u32) -> User {
    User::named(id, name, format!("+1 (555) 010-{:04}", n))
}

fn book(
    id: &str,
    title: &str,
    author: &str,
    now: DateTime<Utc>,
    added_days_ago: i64,
) -> Book {
    let added_at = now - Duration::days(added_days_ago);
    Book {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        status: BookStatus::Available,
        cover_url: Some(format!("https://placeholder.com/book{}", id)),
        owner: current_user(),
        borrower: None,
        holder: None,
        added_at,
        updated_at: added_at,
    }
}

fn lent_to(mut book: Book, borrower: User, now: DateTime<Utc>) -> Book {
    book.status = BookStatus::Borrowed;
    book.borrower = Some(borrower);
    book.updated_at = now - Duration::days(2);
    book
}

fn held_for(mut book: Book, holder: User, now: DateTime<Utc>) -> Book {
    book.status = BookStatus::OnHold;
    book.holder = Some(holder);
    book.updated_at = now - Duration::days(1);
    book
}

/// The current user's library: five books, two lent out, one on hold
pub fn sample_library(now: DateTime<Utc>) -> Library {
    let books = vec![
        book("1", "The Hobbit", "J.R.R. Tolkien", now, 90),
        lent_to(
            book("2", "To Kill a Mockingbird", "Harper Lee", now, 80),
            friend("user8", "Alex", 8),
            now,
        ),
        held_for(
            book("3", "1984", "George Orwell", now, 60),
            friend("user1", "Jamie", 1),
            now,
        ),
        book("4", "The Great Gatsby", "F. Scott Fitzgerald", now, 30),
        lent_to(
            book("5", "Pride and Prejudice", "Jane Austen", now, 10),
            friend("user9", "Taylor", 9),
            now,
        ),
    ];
    Library {
        id: "lib-me".to_string(),
        owner: current_user(),
        books,
        location: None,
        allow_friends_of_friends: true,
        created_at: now - Duration::days(120),
        updated_at: now - Duration::days(1),
    }
}

fn friend_library(
    id: &str,
    owner: User,
    distance: &str,
    book_count: u32,
    latitude: f64,
    longitude: f64,
) -> FriendLibrary {
    FriendLibrary {
        id: id.to_string(),
        owner,
        distance: distance.to_string(),
        book_count,
        coordinate: GeoPoint::new(latitude, longitude),
    }
}

/// Nearby friends, closest first
pub fn sample_friend_libraries() -> Vec<FriendLibrary> {
    vec![
        friend_library("1", friend("user2", "Sarah J.", 2), "0.3 miles", 42, 37.78825, -122.4324),
        friend_library("2", friend("user3", "Marco L.", 3), "0.7 miles", 31, 37.79125, -122.4354),
        friend_library("3", friend("user4", "Lena K.", 4), "1.2 miles", 68, 37.78525, -122.4234),
        friend_library("4", friend("user6", "David R.", 6), "1.7 miles", 23, 37.78925, -122.4384),
        friend_library("5", friend("user5", "Michelle P.", 5), "2.1 miles", 54, 37.78625, -122.4284),
    ]
}

fn book_ref(id: &str, title: &str) -> BookRef {
    BookRef {
        id: id.to_string(),
        title: title.to_string(),
    }
}

/// Recent feed events, newest first
pub fn sample_activities(now: DateTime<Utc>) -> Vec<Activity> {
    vec![
        Activity {
            id: "1".to_string(),
            user: friend("user1", "Jamie", 1),
            timestamp: now - Duration::hours(1),
            kind: ActivityKind::Borrow {
                book: book_ref("book1", "The Lord of the Rings"),
                friend_from: friend("user2", "Sarah", 2),
            },
        },
        Activity {
            id: "2".to_string(),
            user: friend("user3", "Marco", 3),
            timestamp: now - Duration::hours(3),
            kind: ActivityKind::AddBook {
                book: book_ref("book2", "Dune"),
            },
        },
        Activity {
            id: "3".to_string(),
            user: friend("user4", "Lena", 4),
            timestamp: now - Duration::hours(5),
            kind: ActivityKind::Return {
                book: book_ref("book3", "Pride and Prejudice"),
                friend_to: friend("user5", "Michelle", 5),
            },
        },
        Activity {
            id: "4".to_string(),
            user: friend("user6", "David", 6),
            timestamp: now - Duration::hours(8),
            kind: ActivityKind::NewFriend {
                new_friend: friend("user7", "Rachel", 7),
            },
        },
        Activity {
            id: "5".to_string(),
            user: friend("user8", "Alex", 8),
            timestamp: now - Duration::hours(24),
            kind: ActivityKind::Borrow {
                book: book_ref("book4", "The Hobbit"),
                friend_from: friend("user3", "Marco", 3),
            },
        },
    ]
}
