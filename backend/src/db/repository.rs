use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{
    Campus, News, Student, Teacher, UpdateNewsRequest, UpdateStudentRequest, UpdateTeacherRequest,
};

// campuses

pub async fn fetch_campuses(db: &SqlitePool) -> Result<Vec<Campus>, sqlx::Error> {
    sqlx::query_as::<_, Campus>("SELECT id, name FROM campuses ORDER BY name")
        .fetch_all(db)
        .await
}

pub async fn find_campus_by_id(db: &SqlitePool, id: i64) -> Result<Option<Campus>, sqlx::Error> {
    sqlx::query_as::<_, Campus>("SELECT id, name FROM campuses WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert_campus(db: &SqlitePool, name: &str) -> Result<Campus, sqlx::Error> {
    sqlx::query_as::<_, Campus>("INSERT INTO campuses (name) VALUES (?) RETURNING id, name")
        .bind(name)
        .fetch_one(db)
        .await
}

pub async fn update_campus(db: &SqlitePool, id: i64, name: &str) -> Result<Option<Campus>, sqlx::Error> {
    sqlx::query_as::<_, Campus>("UPDATE campuses SET name = ?1 WHERE id = ?2 RETURNING id, name")
        .bind(name)
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn delete_campus(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM campuses WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

// teachers

const TEACHER_COLUMNS: &str = "id, first_name, last_name, email, campus_id";

pub async fn fetch_teachers(db: &SqlitePool) -> Result<Vec<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!(
        "SELECT {TEACHER_COLUMNS} FROM teachers ORDER BY last_name, first_name"
    ))
    .fetch_all(db)
    .await
}

pub async fn find_teacher_by_id(db: &SqlitePool, id: i64) -> Result<Option<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn find_teacher_by_email(db: &SqlitePool, email: &str) -> Result<Option<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE email = ?"))
        .bind(email)
        .fetch_optional(db)
        .await
}

pub async fn insert_teacher(
    db: &SqlitePool,
    first_name: &str,
    last_name: &str,
    email: &str,
    campus_id: Option<i64>,
) -> Result<Teacher, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!(
        r#"
        INSERT INTO teachers (first_name, last_name, email, campus_id)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING {TEACHER_COLUMNS}
        "#
    ))
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(campus_id)
    .fetch_one(db)
    .await
}

pub async fn update_teacher(
    db: &SqlitePool,
    id: i64,
    req: UpdateTeacherRequest,
) -> Result<Option<Teacher>, sqlx::Error> {
    let mut current = match find_teacher_by_id(db, id).await? {
        Some(t) => t,
        None => return Ok(None),
    };

    if let Some(first_name) = req.first_name {
        current.first_name = first_name;
    }
    if let Some(last_name) = req.last_name {
        current.last_name = last_name;
    }
    if let Some(campus_id) = req.campus_id {
        current.campus_id = Some(campus_id);
    }

    sqlx::query("UPDATE teachers SET first_name = ?1, last_name = ?2, campus_id = ?3 WHERE id = ?4")
        .bind(&current.first_name)
        .bind(&current.last_name)
        .bind(current.campus_id)
        .bind(id)
        .execute(db)
        .await?;

    Ok(Some(current))
}

pub async fn delete_teacher(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM teachers WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

// students

const STUDENT_COLUMNS: &str = "id, matricule, first_name, last_name, email, campus_id";

pub async fn fetch_students(db: &SqlitePool) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students ORDER BY last_name, first_name"
    ))
    .fetch_all(db)
    .await
}

pub async fn find_student_by_id(db: &SqlitePool, id: i64) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn find_student_by_email(db: &SqlitePool, email: &str) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLUMNS} FROM students WHERE email = ?"))
        .bind(email)
        .fetch_optional(db)
        .await
}

pub async fn find_student_by_matricule(
    db: &SqlitePool,
    matricule: &str,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLUMNS} FROM students WHERE matricule = ?"))
        .bind(matricule)
        .fetch_optional(db)
        .await
}

pub async fn insert_student(
    db: &SqlitePool,
    matricule: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    campus_id: Option<i64>,
) -> Result<Student, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!(
        r#"
        INSERT INTO students (matricule, first_name, last_name, email, campus_id)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING {STUDENT_COLUMNS}
        "#
    ))
    .bind(matricule)
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(campus_id)
    .fetch_one(db)
    .await
}

pub async fn update_student(
    db: &SqlitePool,
    id: i64,
    req: UpdateStudentRequest,
) -> Result<Option<Student>, sqlx::Error> {
    let mut current = match find_student_by_id(db, id).await? {
        Some(s) => s,
        None => return Ok(None),
    };

    if let Some(first_name) = req.first_name {
        current.first_name = first_name;
    }
    if let Some(last_name) = req.last_name {
        current.last_name = last_name;
    }
    if let Some(matricule) = req.matricule {
        current.matricule = matricule;
    }
    if let Some(campus_id) = req.campus_id {
        current.campus_id = Some(campus_id);
    }

    sqlx::query(
        r#"
        UPDATE students
        SET first_name = ?1,
            last_name = ?2,
            matricule = ?3,
            campus_id = ?4
        WHERE id = ?5
        "#,
    )
    .bind(&current.first_name)
    .bind(&current.last_name)
    .bind(&current.matricule)
    .bind(current.campus_id)
    .bind(id)
    .execute(db)
    .await?;

    Ok(Some(current))
}

pub async fn set_student_campus(
    db: &SqlitePool,
    id: i64,
    campus_id: i64,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!(
        "UPDATE students SET campus_id = ?1 WHERE id = ?2 RETURNING {STUDENT_COLUMNS}"
    ))
    .bind(campus_id)
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_student(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

// news

const NEWS_COLUMNS: &str = "id, title, description, image_url, links, campus_id, created_at, updated_at";

pub async fn fetch_news(db: &SqlitePool) -> Result<Vec<News>, sqlx::Error> {
    sqlx::query_as::<_, News>(&format!(
        "SELECT {NEWS_COLUMNS} FROM news ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(db)
    .await
}

pub async fn fetch_news_by_campus(db: &SqlitePool, campus_id: i64) -> Result<Vec<News>, sqlx::Error> {
    sqlx::query_as::<_, News>(&format!(
        "SELECT {NEWS_COLUMNS} FROM news WHERE campus_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(campus_id)
    .fetch_all(db)
    .await
}

pub async fn find_news_by_id(db: &SqlitePool, id: i64) -> Result<Option<News>, sqlx::Error> {
    sqlx::query_as::<_, News>(&format!("SELECT {NEWS_COLUMNS} FROM news WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert_news(
    db: &SqlitePool,
    title: &str,
    description: &str,
    image_url: Option<&str>,
    links: Option<&str>,
    campus_id: i64,
) -> Result<News, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, News>(&format!(
        r#"
        INSERT INTO news (title, description, image_url, links, campus_id, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        RETURNING {NEWS_COLUMNS}
        "#
    ))
    .bind(title)
    .bind(description)
    .bind(image_url)
    .bind(links)
    .bind(campus_id)
    .bind(now)
    .fetch_one(db)
    .await
}

pub async fn update_news(
    db: &SqlitePool,
    id: i64,
    req: UpdateNewsRequest,
) -> Result<Option<News>, sqlx::Error> {
    let mut current = match find_news_by_id(db, id).await? {
        Some(n) => n,
        None => return Ok(None),
    };

    if let Some(title) = req.title {
        current.title = title;
    }
    if let Some(description) = req.description {
        current.description = description;
    }
    if let Some(image_url) = req.image_url {
        current.image_url = Some(image_url);
    }
    if let Some(links) = req.links {
        current.links = Some(links);
    }
    current.updated_at = Utc::now();

    sqlx::query(
        r#"
        UPDATE news
        SET title = ?1,
            description = ?2,
            image_url = ?3,
            links = ?4,
            updated_at = ?5
        WHERE id = ?6
        "#,
    )
    .bind(&current.title)
    .bind(&current.description)
    .bind(&current.image_url)
    .bind(&current.links)
    .bind(current.updated_at)
    .bind(id)
    .execute(db)
    .await?;

    Ok(Some(current))
}

pub async fn delete_news(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM news WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn delete_news_by_title(db: &SqlitePool, title: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM news WHERE title = ?")
        .bind(title)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result)
}
