//! Document fixtures.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

pub const BEANS_NS: &str = "http://www.springframework.org/schema/beans";
pub const CONTEXT_NS: &str = "http://www.springframework.org/schema/context";
pub const UTIL_NS: &str = "http://www.springframework.org/schema/util";

/// Wrap declarations in a `<beans>` root declaring the usual namespaces.
pub fn beans(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<beans xmlns="{BEANS_NS}" xmlns:context="{CONTEXT_NS}" xmlns:util="{UTIL_NS}">
{body}
</beans>
"#
    )
}

pub const DATA_LAYER: &str = r#"
    <bean id="dataSource" class="com.acme.jdbc.PooledDataSource" destroy-method="close"/>
    <bean id="txManager" class="com.acme.tx.TxManager">
        <property name="dataSource" ref="dataSource"/>
    </bean>
    <alias name="dataSource" alias="primaryDataSource"/>
"#;

pub const SERVICES: &str = r#"
    <context:component-scan base-package="com.acme.service"/>
    <bean id="widgetService" name="widgets,widgetSvc" class="com.acme.service.WidgetService"/>
    <bean id="clock" class="java.time.Clock" factory-method="systemUTC"/>
    <bean id="template" abstract="true" parent="baseTemplate"/>
    <util:list id="regions">
        <value>eu</value>
        <value>us</value>
    </util:list>
"#;

pub const FACTORIES: &str = r#"
    <bean id="sessionFactory" class="org.example.SessionFactoryBean"/>
    <bean id="session" factory-bean="sessionFactory" factory-method="open"/>
    <util:property-path path="sessionFactory.timeout"/>
"#;

/// Write `text` to `dir/relative`, creating parent directories.
pub fn write(dir: &Path, relative: &str, text: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

/// A small project: two modules of bean documents plus unrelated XML.
pub fn project(dir: &Path) {
    write(dir, "core/src/main/resources/data.xml", &beans(DATA_LAYER));
    write(dir, "core/src/main/resources/factories.xml", &beans(FACTORIES));
    write(dir, "web/src/main/resources/services.xml", &beans(SERVICES));
    write(dir, "web/pom.xml", "<project><modelVersion>4.0.0</modelVersion></project>");
    write(dir, "web/README.md", "# web");
}
