#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::thread;

use beanscope::{IndexHost, SearchScope};

use crate::helpers::fixtures::beans;

fn path(n: usize) -> PathBuf {
    PathBuf::from(format!("/ws/doc{n}.xml"))
}

#[test]
fn test_queries_run_alongside_edits() {
    let host = IndexHost::default();
    for n in 0..8 {
        host.set_file_content(&path(n), &beans(r#"<bean id="shared" class="com.acme.A"/>"#));
    }

    thread::scope(|scope| {
        for writer in 0..4 {
            let host = &host;
            scope.spawn(move || {
                for round in 0..25 {
                    let n = (writer * 2 + round) % 8;
                    let body = if round % 2 == 0 {
                        r#"<bean id="shared" class="com.acme.B"/>"#
                    } else {
                        r#"<bean id="shared" class="com.acme.A"/>"#
                    };
                    host.set_file_content(&path(n), &beans(body));
                }
            });
        }
        for _ in 0..4 {
            let host = &host;
            scope.spawn(move || {
                for _ in 0..25 {
                    // Every document always declares `shared`, whatever
                    // version of it a reader sees.
                    let hits: Vec<_> = host
                        .query()
                        .find_by_name("shared", &SearchScope::Everything)
                        .collect();
                    assert_eq!(hits.len(), 8);
                    for hit in &hits {
                        assert_eq!(hit.bean_name.as_deref(), Some("shared"));
                    }
                }
            });
        }
    });

    assert_eq!(host.document_count(), 8);
    assert_eq!(host.store().len(), 8);
}

#[test]
fn test_dirty_documents_rebuild_once() {
    let host = IndexHost::default();
    for n in 0..16 {
        host.set_file_content(&path(n), &beans(&format!(r#"<bean id="b{n}"/>"#)));
        host.mark_dirty(&path(n));
    }

    let flushed: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| host.flush()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });
    assert_eq!(flushed, 16);
    assert_eq!(host.flush(), 0);
    assert_eq!(
        host.query()
            .find_by_name("b7", &SearchScope::Everything)
            .count(),
        1
    );
}
